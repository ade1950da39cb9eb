//! Tests for folder ID extraction.

use drive_export::url_parser::extract_folder_id;

mod folder_urls {
    use super::*;

    #[test]
    fn folder_url_with_user() {
        let url = "https://drive.google.com/drive/u/1/folders/1ZaPoNf2RhMxonGKhGBgTBSTJ0ZxnQs82";
        assert_eq!(
            extract_folder_id(url).unwrap(),
            "1ZaPoNf2RhMxonGKhGBgTBSTJ0ZxnQs82"
        );
    }

    #[test]
    fn folder_url_with_query_params() {
        let url = "https://drive.google.com/drive/folders/1abc123XYZ?usp=sharing";
        assert_eq!(extract_folder_id(url).unwrap(), "1abc123XYZ");
    }

    #[test]
    fn open_url() {
        let url = "https://drive.google.com/open?id=1abc123XYZ";
        assert_eq!(extract_folder_id(url).unwrap(), "1abc123XYZ");
    }
}

mod raw_ids {
    use super::*;

    #[test]
    fn id_with_whitespace_trimmed() {
        assert_eq!(extract_folder_id("\t1abc-123_XYZ\n").unwrap(), "1abc-123_XYZ");
    }
}

mod invalid_inputs {
    use super::*;

    #[test]
    fn empty_or_blank() {
        assert!(extract_folder_id("").is_err());
        assert!(extract_folder_id("   ").is_err());
    }

    #[test]
    fn foreign_url() {
        assert!(extract_folder_id("https://example.com/folders/123").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(extract_folder_id("abc 123").is_err());
        assert!(extract_folder_id("abc/123").is_err());
    }
}

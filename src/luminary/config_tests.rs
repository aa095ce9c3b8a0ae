// Configuration tests

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::luminary::config::ConverterConfig;
    use crate::luminary::error::ConvertError;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.date, None);
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.tool_name, "yarn2luminary");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(
            ConverterConfig::from_toml("").unwrap(),
            ConverterConfig::default()
        );
    }

    #[test]
    fn test_fixed_date() {
        let config = ConverterConfig::from_toml("date = \"01/02/2021\"\n").unwrap();
        assert_eq!(config.banner_date(), "01/02/2021");
        assert_eq!(config.tool_name, "yarn2luminary");
    }

    #[test]
    fn test_today_uses_format() {
        let config = ConverterConfig::from_toml("date_format = \"%Y\"\n").unwrap();
        let date = config.banner_date();
        assert_eq!(date.len(), 4);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_bad_date_format_rejected() {
        let err = ConverterConfig::from_toml("date_format = \"%Y%\"\n").unwrap_err();
        assert!(err.to_string().contains("date_format"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ConverterConfig::from_toml("colour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yarn2luminary.toml");
        fs::write(&path, "tool_name = \"YarnToLuminary\"\n").unwrap();

        let config = ConverterConfig::load(&path).unwrap();
        assert_eq!(config.tool_name, "YarnToLuminary");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConverterConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }
}

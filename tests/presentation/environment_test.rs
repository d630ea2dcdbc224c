use ielts_scoring::presentation::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_maps_case_insensitively() {
    assert_eq!(Environment::try_from("PROD".to_string()), Ok(Environment::Prod));
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("dev".to_string()), Ok(Environment::Local));
}

#[test]
fn given_unknown_name_when_parsing_environment_then_returns_error() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_name() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
    assert_eq!(Environment::Local.to_string(), "local");
}

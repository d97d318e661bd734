use postcode_rules::core::validator::validate_format;
use postcode_rules::{PostCodeError, PostCodeService, RuleRegistry};

#[test]
fn test_every_builtin_example_matches_its_pattern() {
    let registry = RuleRegistry::builtin();
    let mut checked = 0;

    for rule in registry.iter() {
        let Some(example) = &rule.example else {
            continue;
        };
        assert!(
            validate_format(rule, example).is_ok(),
            "{} example '{}' should match {:?}",
            rule.country_code,
            example,
            rule.pattern_str()
        );
        checked += 1;
    }

    assert!(checked > 100);
}

#[test]
fn test_five_digit_rule() {
    let service = PostCodeService::builtin();

    assert_eq!(service.check_format("DE", "12345").unwrap(), "5 digits, e.g. 12345");
    for code in ["1234", "123456"] {
        assert!(matches!(
            service.check_format("DE", code),
            Err(PostCodeError::FormatMismatch { .. })
        ));
    }
}

#[test]
fn test_us_zip_plus_four() {
    let service = PostCodeService::builtin();
    assert!(service.check_format("US", "12345").is_ok());
    assert!(service.check_format("US", "12345-6789").is_ok());
    assert!(service.check_format("US", "12345-678").is_err());
    assert!(service.check_format("US", "123456789").is_err());
}

#[test]
fn test_canada_excludes_ambiguous_letters() {
    let service = PostCodeService::builtin();
    assert!(service.check_format("CA", "K1A 0B1").is_ok());
    assert!(service.check_format("CA", "k1a0b1").is_ok());
    assert!(service.check_format("CA", "D1A 0B1").is_err());
    assert!(service.check_format("CA", "K1A 0O1").is_err());
}

#[test]
fn test_format_check_does_not_apply_fix() {
    let service = PostCodeService::builtin();
    assert!(service.check_format("GB", "SW1A 1AA").is_ok());
    assert!(service.check_format("GB", "SW1A1AA").is_err());
}

#[test]
fn test_country_without_postcode() {
    let service = PostCodeService::builtin();
    match service.check_format("ao", "12345") {
        Err(PostCodeError::InvalidInput { message }) => {
            assert!(message.contains("no postal code"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_unknown_country() {
    let service = PostCodeService::builtin();
    assert!(matches!(
        service.check_format("ZZ", "12345"),
        Err(PostCodeError::RuleNotFound { .. })
    ));
}

#[test]
fn test_pattern_lookup() {
    let service = PostCodeService::builtin();
    let info = service.pattern(" jp ").unwrap();
    assert_eq!(info.country_code, "JP");
    assert_eq!(info.pattern, "^[0-9]{7}$");
    assert_eq!(info.description, "7 digits, e.g. 1234567");

    assert!(matches!(
        service.pattern(""),
        Err(PostCodeError::InvalidInput { .. })
    ));
}

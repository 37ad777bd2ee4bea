//! Tests for fact loading and canonical serialization

use rstest::rstest;

use factlogic::domain::{facts, DomainError, VariableStore};

#[test]
fn given_fact_lines_when_loading_then_trims_names_and_values() {
    // Arrange
    let text = "a=5\n  b = 2.5  \n\nc=-1\n";

    // Act
    let store = facts::load(text).unwrap();

    // Assert
    assert_eq!(
        store,
        VariableStore::from([
            ("a".to_string(), 5.0),
            ("b".to_string(), 2.5),
            ("c".to_string(), -1.0),
        ])
    );
}

#[test]
fn given_empty_text_when_loading_then_store_is_empty() {
    assert!(facts::load("").unwrap().is_empty());
    assert!(facts::load("\n   \n").unwrap().is_empty());
}

#[test]
fn given_repeated_name_when_loading_then_last_value_wins() {
    let store = facts::load("a=1\na=2\n").unwrap();
    assert_eq!(store.get("a"), Some(&2.0));
    assert_eq!(store.len(), 1);
}

#[test]
fn given_value_with_equals_when_loading_then_splits_on_first() {
    // "a==1" is name "a", value "=1", which is not a number
    let err = facts::load("a==1").unwrap_err();
    assert!(matches!(err, DomainError::ValueParse { ref token, .. } if token == "=1"));
}

#[test]
fn given_line_without_equals_when_loading_then_data_format_error() {
    // Arrange
    let text = "a=1\nfoo\n";

    // Act
    let err = facts::load(text).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::DataFormat {
            line: 2,
            content: "foo".to_string()
        }
    );
}

#[rstest]
#[case("=5")]
#[case("  = 5")]
fn given_empty_name_when_loading_then_data_format_error(#[case] text: &str) {
    let err = facts::load(text).unwrap_err();
    assert!(matches!(err, DomainError::DataFormat { line: 1, .. }));
}

#[rstest]
#[case("a=five", "five")]
#[case("a=", "")]
#[case("a=inf", "inf")]
#[case("a=+inf", "+inf")]
#[case("a=-nan", "-nan")]
#[case("a=1e999", "1e999")]
#[case("a=1e", "1e")]
fn given_non_numeric_value_when_loading_then_value_parse_error(
    #[case] text: &str,
    #[case] token: &str,
) {
    let err = facts::load(text).unwrap_err();
    assert_eq!(
        err,
        DomainError::ValueParse {
            token: token.to_string(),
            line: Some(1)
        }
    );
}

#[test]
fn given_store_when_serialized_and_reloaded_then_identical() {
    // Arrange
    let store = facts::load("z=3\na=0.25\nm=-7\n").unwrap();

    // Act
    let text = facts::serialize(&store);

    // Assert: key order, integral values without fraction
    assert_eq!(text, "a=0.25\nm=-7\nz=3\n");
    assert_eq!(facts::load(&text).unwrap(), store);
}

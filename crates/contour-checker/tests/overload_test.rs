//! Integration tests for overload resolution and type assertions

use contour_checker::{check_cast, non_null, resolve_overload, CheckError, OverloadSet};
use contour_types::{FunctionType, Type};
use pretty_assertions::assert_eq;

fn combinable() -> Type {
    Type::union(vec![Type::string(), Type::number()]).unwrap()
}

fn add() -> OverloadSet {
    OverloadSet::with_implementation(
        "add",
        vec![
            FunctionType::new(vec![Type::number(), Type::number()], Type::number()),
            FunctionType::new(vec![Type::string(), Type::string()], Type::string()),
            FunctionType::new(vec![Type::string(), Type::number()], Type::string()),
            FunctionType::new(vec![Type::number(), Type::string()], Type::string()),
        ],
        FunctionType::new(vec![combinable(), combinable()], combinable()),
    )
    .unwrap()
}

#[test]
fn test_call_result_follows_overload() {
    let add = add();

    // const result = add("Max", " Schwarz"); result.split(" ")
    assert_eq!(
        add.call_return_type(&[Type::string_literal("Max"), Type::string_literal(" Schwarz")])
            .unwrap(),
        Type::string()
    );
    assert_eq!(
        add.call_return_type(&[Type::number(), Type::number()]).unwrap(),
        Type::number()
    );
}

#[test]
fn test_implementation_signature_is_not_callable() {
    let add = add();
    let err = add.resolve(&[combinable(), Type::number()]).unwrap_err();

    assert_eq!(
        err,
        CheckError::NoMatchingOverload {
            args: vec![combinable(), Type::number()]
        }
    );
    assert_eq!(
        err.to_string(),
        "No overload matches arguments (number | string, number)"
    );
}

#[test]
fn test_resolution_against_plain_signatures() {
    let signatures = vec![
        FunctionType::new(vec![Type::string()], Type::string()),
        FunctionType::new(vec![Type::Unknown], Type::boolean()),
    ];

    let picked = resolve_overload(&signatures, &[Type::number()]).unwrap();
    assert_eq!(*picked.returns, Type::boolean());
}

#[test]
fn test_dom_style_assertions() {
    let html_element = Type::object(vec![("id", Type::string())]).unwrap();
    let input_element =
        Type::object(vec![("id", Type::string()), ("value", Type::string())]).unwrap();

    // document.getElementById("user-input")! as HTMLInputElement
    let lookup = Type::union(vec![html_element, Type::null()]).unwrap();
    let element = non_null(&lookup);
    assert_eq!(check_cast(&element, &input_element).unwrap(), input_element);

    // The element type overlaps the nullable lookup as well
    assert!(check_cast(&lookup, &input_element).is_ok());

    assert!(matches!(
        check_cast(&Type::number(), &input_element),
        Err(CheckError::InvalidCast { .. })
    ));
}

//! Integration tests for type narrowing

use contour_checker::{apply_type_guard, NarrowingEnv, TypeGuard};
use contour_types::{union_of, Type};
use pretty_assertions::assert_eq;

fn admin() -> Type {
    Type::object(vec![
        ("name", Type::string()),
        ("privileges", Type::array(Type::string())),
    ])
    .unwrap()
}

fn employee() -> Type {
    Type::object(vec![("name", Type::string()), ("startDate", Type::string())]).unwrap()
}

#[test]
fn test_typeof_narrowing_if_else() {
    // function add(a: Combinable, b: Combinable) {
    //     if (typeof a === "string" || typeof b === "string") { ... }
    let combinable = Type::union(vec![Type::string(), Type::number()]).unwrap();
    let guard = TypeGuard::type_of("a", "string");

    let (then_env, else_env) = NarrowingEnv::new().branch(&guard, &combinable);
    assert_eq!(then_env.get("a"), Some(&Type::string()));
    assert_eq!(else_env.get("a"), Some(&Type::number()));
}

#[test]
fn test_in_narrowing_unknown_employee() {
    // if ("privileges" in emp) { console.log(emp.privileges) }
    let unknown_employee = Type::union(vec![employee(), admin()]).unwrap();
    let guard = TypeGuard::has_field("emp", "privileges");

    assert_eq!(apply_type_guard(&unknown_employee, &guard), admin());
    assert_eq!(apply_type_guard(&unknown_employee, &guard.negate()), employee());

    // Every member has a name
    let guard = TypeGuard::has_field("emp", "name");
    assert_eq!(apply_type_guard(&unknown_employee, &guard), unknown_employee);
}

#[test]
fn test_sequential_guards_accumulate() {
    let declared = Type::union(vec![
        Type::string(),
        Type::number(),
        Type::boolean(),
        Type::null(),
    ])
    .unwrap();

    let mut env = NarrowingEnv::new();
    env.narrow(&TypeGuard::is_nullish("x").negate(), &declared);
    let narrowed = env.narrow(&TypeGuard::type_of("x", "boolean").negate(), &declared);

    assert_eq!(narrowed, Type::union(vec![Type::string(), Type::number()]).unwrap());
    assert_eq!(env.get("x"), Some(&narrowed));
}

#[test]
fn test_join_point_restores_union() {
    let declared = Type::union(vec![admin(), employee()]).unwrap();
    let guard = TypeGuard::has_field("emp", "privileges");

    let (then_env, else_env) = NarrowingEnv::new().branch(&guard, &declared);
    let joined = then_env.merge(&else_env);

    assert_eq!(joined.get("emp"), Some(&declared));
}

#[test]
fn test_reassignment_drops_narrowing() {
    let declared = Type::union(vec![Type::string(), Type::null()]).unwrap();
    let mut env = NarrowingEnv::new();

    env.narrow(&TypeGuard::is_nullish("x").negate(), &declared);
    assert_eq!(env.get("x"), Some(&Type::string()));

    env.remove("x");
    assert!(env.get("x").is_none());
}

#[test]
fn test_discriminated_union_switch() {
    let bird = Type::object(vec![
        ("type", Type::string_literal("bird")),
        ("flyingSpeed", Type::number()),
    ])
    .unwrap();
    let horse = Type::object(vec![
        ("type", Type::string_literal("horse")),
        ("runningSpeed", Type::number()),
    ])
    .unwrap();
    let animal = union_of([bird.clone(), horse.clone()]);

    let case_bird = TypeGuard::discriminant("animal", "type", "bird");
    let case_horse = TypeGuard::discriminant("animal", "type", "horse");
    assert_eq!(apply_type_guard(&animal, &case_bird), bird);
    assert_eq!(apply_type_guard(&animal, &case_horse), horse);

    // default branch after both cases is unreachable
    let mut env = NarrowingEnv::new();
    env.narrow(&case_bird.negate(), &animal);
    assert_eq!(env.narrow(&case_horse.negate(), &animal), Type::Never);
}

#[test]
fn test_generic_parameter_survives_guards() {
    let ty = Type::union(vec![Type::param("T"), Type::null()]).unwrap();
    let guard = TypeGuard::is_nullish("value").negate();

    assert_eq!(apply_type_guard(&ty, &guard), Type::param("T"));
}

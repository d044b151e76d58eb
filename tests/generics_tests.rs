use definition_finder::FileParser;
use definition_finder::defs::{ConstraintKind, Variance};

#[test]
fn nested_generic_closed_by_shift_right() {
    let parser =
        FileParser::from_data("<?hh\nfunction f(): Vector<Vector<int>> {}\n").unwrap();
    let ret = parser.get_function("f").unwrap().return_type().unwrap().clone();
    assert_eq!(ret.type_name(), "Vector");
    assert_eq!(ret.generics[0].type_name(), "Vector");
    assert_eq!(ret.generics[0].generics[0].type_name(), "int");
}

#[test]
fn triply_nested_generic() {
    let parser =
        FileParser::from_data("<?hh\nfunction f(): Vector<Vector<Vector<int>>> {}\n").unwrap();
    let ret = parser.get_function("f").unwrap().return_type().unwrap().clone();
    assert_eq!(
        ret.generics[0].generics[0].generics[0].type_name(),
        "int"
    );
}

#[test]
fn generic_with_several_arguments() {
    let parser = FileParser::from_data("<?hh\nfunction f(): dict<string, int> {}\n").unwrap();
    let ret = parser.get_function("f").unwrap().return_type().unwrap().clone();
    assert_eq!(ret.type_name(), "dict");
    let args: Vec<&str> = ret.generics.iter().map(|t| t.type_name()).collect();
    assert_eq!(args, vec!["string", "int"]);
}

#[test]
fn trailing_comma_in_generic_arguments() {
    let parser = FileParser::from_data("<?hh\nfunction f(): dict<string, int,> {}\n").unwrap();
    let ret = parser.get_function("f").unwrap().return_type().unwrap().clone();
    assert_eq!(ret.generics.len(), 2);
}

#[test]
fn variance_markers() {
    let parser = FileParser::from_data("<?hh\nclass C<+Tk, -Tv, T> {}\n").unwrap();
    let generics = &parser.get_class("C").unwrap().generics;
    assert_eq!(generics[0].variance, Some(Variance::Covariant));
    assert_eq!(generics[1].variance, Some(Variance::Contravariant));
    assert_eq!(generics[2].variance, None);
}

#[test]
fn generic_constraints() {
    let parser =
        FileParser::from_data("<?hh\nclass C<T as arraykey, Tu super string> {}\n").unwrap();
    let generics = &parser.get_class("C").unwrap().generics;

    assert_eq!(generics[0].constraints.len(), 1);
    assert_eq!(generics[0].constraints[0].relation, ConstraintKind::As);
    assert_eq!(generics[0].constraints[0].typehint.type_name(), "arraykey");

    assert_eq!(generics[1].constraints[0].relation, ConstraintKind::Super);
    assert_eq!(generics[1].constraints[0].typehint.type_name(), "string");
}

#[test]
fn super_constraint_next_to_super_as_a_name() {
    // `super` is a constraint keyword here and a plain class name there.
    let parser =
        FileParser::from_data("<?hh\nclass C<T super string> {}\nclass super {}\n").unwrap();
    let generics = &parser.get_class("C").unwrap().generics;
    assert_eq!(generics[0].constraints[0].relation, ConstraintKind::Super);
    assert!(parser.get_class("super").is_some());
}

#[test]
fn several_constraints_on_one_parameter() {
    let parser =
        FileParser::from_data("<?hh\nclass C<T as A as B> {}\n").unwrap();
    let generics = &parser.get_class("C").unwrap().generics;
    assert_eq!(generics[0].constraints.len(), 2);
}

#[test]
fn generic_constraint_ending_in_shift_right() {
    let parser = FileParser::from_data("<?hh\nclass D<T as Vector<int>> {}\n").unwrap();
    let generics = &parser.get_class("D").unwrap().generics;
    assert_eq!(generics[0].constraints[0].typehint.type_name(), "Vector");
}

#[test]
fn generic_type_alias() {
    let parser = FileParser::from_data("<?hh\ntype Pair<T> = (T, T);\n").unwrap();
    let pair = parser.get_type("Pair").unwrap();
    assert_eq!(pair.generics[0].name, "T");
    assert_eq!(pair.value.type_name(), "tuple");
    assert!(pair.value.generics[0].is_alias);
}

#[test]
fn comparison_in_skipped_body_is_not_a_generic() {
    let parser = FileParser::from_data(
        "<?php\nfunction f($a, $b) {\n  if ($a < $b) { return $a >> 2; }\n  return $b;\n}\nfunction g() {}\n",
    )
    .unwrap();
    assert_eq!(parser.function_names(), vec!["f", "g"]);
}

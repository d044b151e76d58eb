use definition_finder::FileParser;
use definition_finder::defs::Visibility;

#[test]
fn parameter_typehints_and_defaults() {
    let parser = FileParser::from_data(
        "<?hh\nfunction totals(int $x, ?string $label = null, float $rate = 1.5): int {}\n",
    )
    .unwrap();
    let f = parser.get_function("totals").unwrap();
    assert_eq!(f.params.len(), 3);

    assert_eq!(f.params[0].name, "x");
    assert_eq!(f.params[0].typehint.as_ref().unwrap().type_name(), "int");
    assert!(!f.params[0].has_default);

    assert_eq!(f.params[1].name, "label");
    assert!(f.params[1].typehint.as_ref().unwrap().is_nullable());
    assert!(f.params[1].has_default);
    assert_eq!(f.params[1].default.as_deref(), Some("null"));

    assert_eq!(f.params[2].default.as_deref(), Some("1.5"));
    assert_eq!(f.return_type().unwrap().type_name(), "int");
}

#[test]
fn untyped_parameters() {
    let parser = FileParser::from_data("<?php\nfunction f($a, $b) {}\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.params.len(), 2);
    assert!(f.params[0].typehint.is_none());
    assert!(f.params[1].typehint.is_none());
}

#[test]
fn variadic_parameter() {
    let parser =
        FileParser::from_data("<?hh\nfunction sum(int $first, int ...$rest) {}\n").unwrap();
    let f = parser.get_function("sum").unwrap();
    assert!(!f.params[0].is_variadic);
    assert!(f.params[1].is_variadic);
    assert_eq!(f.params[1].name, "rest");
    assert_eq!(f.params[1].typehint.as_ref().unwrap().type_name(), "int");
}

#[test]
fn bare_variadic_has_no_name() {
    let parser = FileParser::from_data("<?php\nfunction v($a, ...) {}\n").unwrap();
    let f = parser.get_function("v").unwrap();
    assert!(f.params[1].is_variadic);
    assert_eq!(f.params[1].name, "");
}

#[test]
fn by_ref_parameter_and_return() {
    let parser = FileParser::from_data("<?php\nfunction &f(&$x) { return $x; }\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.returns_by_ref);
    assert!(f.params[0].by_ref);
    assert!(f.params[0].typehint.is_none());
}

#[test]
fn inout_parameter() {
    let parser = FileParser::from_data("<?hh\nfunction swap(inout int $a) {}\n").unwrap();
    let f = parser.get_function("swap").unwrap();
    assert!(f.params[0].is_inout);
    assert_eq!(f.params[0].typehint.as_ref().unwrap().type_name(), "int");
}

#[test]
fn constructor_promotion() {
    let parser = FileParser::from_data(
        "<?hh\nclass P {\n  public function __construct(private int $id, public string $name = \"x\") {}\n}\n",
    )
    .unwrap();
    let ctor = parser.get_class("P").unwrap().method("__construct").unwrap();
    assert_eq!(ctor.params[0].visibility, Some(Visibility::Private));
    assert_eq!(ctor.params[1].visibility, Some(Visibility::Public));
    assert_eq!(ctor.params[1].default.as_deref(), Some("\"x\""));
}

#[test]
fn parameter_attributes() {
    let parser =
        FileParser::from_data("<?hh\nfunction f(<<Inject>> int $svc) {}\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.params[0].attributes.contains_key("Inject"));
}

#[test]
fn default_value_with_nested_brackets() {
    let parser = FileParser::from_data(
        "<?php\nfunction f($x = array(1, array(2, 3)), $y = 4) {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.params[0].default.as_deref(), Some("array(1, array(2, 3))"));
    assert_eq!(f.params[1].default.as_deref(), Some("4"));
}

#[test]
fn whitespace_and_comments_never_matter() {
    let spaced = FileParser::from_data(
        "<?hh\nfunction /* a comment */ foo ( int $x ) : void {}\n",
    )
    .unwrap();
    let tight = FileParser::from_data("<?hh\nfunction foo(int $x):void{}\n").unwrap();
    assert_eq!(
        spaced.get_function("foo").unwrap(),
        tight.get_function("foo").unwrap()
    );
}

#[test]
fn trailing_comma_in_parameter_list() {
    let parser = FileParser::from_data("<?hh\nfunction f(int $a, string $b,) {}\n").unwrap();
    assert_eq!(parser.get_function("f").unwrap().params.len(), 2);
}

#[test]
fn nested_function_definitions_are_not_scanned() {
    let parser = FileParser::from_data(
        "<?php\nfunction outer() {\n  function inner() {}\n}\n",
    )
    .unwrap();
    assert_eq!(parser.function_names(), vec!["outer"]);
}

#[test]
fn callable_and_tuple_typehints() {
    let parser = FileParser::from_data(
        "<?hh\nfunction f((function(int): string) $cb): (int, string) {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.params[0].typehint.as_ref().unwrap().type_name(), "callable");
    let ret = f.return_type().unwrap();
    assert_eq!(ret.type_name(), "tuple");
    let members: Vec<&str> = ret.generics.iter().map(|t| t.type_name()).collect();
    assert_eq!(members, vec!["int", "string"]);
}

#[test]
fn shape_typehint_fields_not_scanned() {
    let parser = FileParser::from_data(
        "<?hh\nfunction f(): shape('id' => int, 'name' => string) {}\n",
    )
    .unwrap();
    let ret = parser.get_function("f").unwrap().return_type().unwrap();
    assert_eq!(ret.type_name(), "shape");
    assert!(ret.generics.is_empty());
}

#[test]
fn async_top_level_function() {
    let parser =
        FileParser::from_data("<?hh\nasync function f(): Awaitable<void> {}\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.is_async);
}

#[test]
fn heredoc_default_value() {
    let parser = FileParser::from_data(
        "<?php\nconst GREETING = <<<EOT\nhello\nEOT;\n",
    )
    .unwrap();
    let value = parser.get_constant("GREETING").unwrap().value.clone().unwrap();
    assert!(value.contains("hello"));
}

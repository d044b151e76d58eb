use definition_finder::{FileParser, ScanError};

#[test]
fn attribute_with_string_arguments() {
    let parser = FileParser::from_data(
        "<?hh\n<<Foo(\"herp\", \"derp\")>>\nfunction f() {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.attributes.get("Foo").unwrap(), &vec!["herp", "derp"]);
}

#[test]
fn concatenated_string_argument() {
    let parser = FileParser::from_data(
        "<?hh\n<<Foo(\"herp\" . \"derp\")>>\nfunction f() {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.attributes.get("Foo").unwrap(), &vec!["herpderp"]);
}

#[test]
fn single_quoted_argument() {
    let parser =
        FileParser::from_data("<?hh\n<<Foo('herp')>>\nfunction f() {}\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.attributes.get("Foo").unwrap(), &vec!["herp"]);
}

#[test]
fn bare_attribute_has_empty_arguments() {
    let parser = FileParser::from_data("<?hh\n<<Uns>>\nclass C {}\n").unwrap();
    let c = parser.get_class("C").unwrap();
    assert_eq!(c.attributes.get("Uns").unwrap(), &Vec::<String>::new());
}

#[test]
fn several_attributes_in_one_list() {
    let parser = FileParser::from_data(
        "<?hh\n<<First, Second(\"x\"), Third>>\nclass C {}\n",
    )
    .unwrap();
    let c = parser.get_class("C").unwrap();
    let names: Vec<&String> = c.attributes.keys().collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(c.attributes.get("Second").unwrap(), &vec!["x"]);
}

#[test]
fn attributes_accumulate_across_lists() {
    let parser = FileParser::from_data(
        "<?hh\n<<First>>\n<<Second>>\nfunction f() {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.attributes.contains_key("First"));
    assert!(f.attributes.contains_key("Second"));
}

#[test]
fn attributes_before_a_use_statement_do_not_carry_over() {
    let parser = FileParser::from_data(
        "<?hh\n<<Foo>>\nuse Herp\\Derp;\nfunction f() {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.attributes.is_empty());
}

#[test]
fn attributes_before_a_trait_use_do_not_carry_over() {
    let parser = FileParser::from_data(
        "<?hh\nclass C {\n  <<Foo>>\n  use SomeTrait;\n  public function f() {}\n}\n",
    )
    .unwrap();
    let c = parser.get_class("C").unwrap();
    assert!(c.method("f").unwrap().attributes.is_empty());
}

#[test]
fn attribute_on_enum_and_type_alias() {
    let parser = FileParser::from_data(
        "<?hh\n<<A>>\nenum E: int {\n  X = 1;\n}\n<<B>>\ntype T2 = int;\n",
    )
    .unwrap();
    assert!(parser.get_enum("E").unwrap().attributes.contains_key("A"));
    assert!(parser.get_type("T2").unwrap().attributes.contains_key("B"));
}

#[test]
fn escaped_quotes_in_arguments() {
    let parser = FileParser::from_data(
        "<?hh\n<<Foo(\"say \\\"hi\\\"\", 'it\\'s')>>\nfunction f() {}\n",
    )
    .unwrap();
    let f = parser.get_function("f").unwrap();
    assert_eq!(f.attributes.get("Foo").unwrap(), &vec!["say \"hi\"", "it's"]);
}

#[test]
fn numeric_attribute_argument_is_fatal() {
    let err = FileParser::from_data("<?hh\n<<Foo(123)>>\nfunction f() {}\n").unwrap_err();
    assert!(matches!(
        err,
        ScanError::UnsupportedAttributeExpression { .. }
    ));
}

#[test]
fn variable_attribute_argument_is_fatal() {
    let err = FileParser::from_data("<?hh\n<<Foo($x)>>\nfunction f() {}\n").unwrap_err();
    assert!(matches!(
        err,
        ScanError::UnsupportedAttributeExpression { .. }
    ));
}

#[test]
fn attribute_with_reserved_looking_name() {
    let parser = FileParser::from_data("<?hh\n<<select>>\nfunction f() {}\n").unwrap();
    let f = parser.get_function("f").unwrap();
    assert!(f.attributes.contains_key("select"));
}

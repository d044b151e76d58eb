use definition_finder::FileParser;
use insta::assert_snapshot;

#[test]
fn typehint_serialization() {
    let parser = FileParser::from_data("<?hh\nfunction f(): ?Vector<int> {}\n").unwrap();
    let hint = parser.get_function("f").unwrap().return_type().unwrap();
    let json = serde_json::to_string(hint).unwrap();
    assert_snapshot!(json, @r#"{"name":"Vector","nullable":true,"generics":[{"name":"int","nullable":false,"generics":[],"is_alias":false}],"is_alias":false}"#);
}

#[test]
fn constant_serialization() {
    let parser = FileParser::from_data("<?hh\nconst int ANSWER = 42;\n").unwrap();
    let constant = parser.get_constant("ANSWER").unwrap();
    let json = serde_json::to_string(constant).unwrap();
    assert_snapshot!(json, @r#"{"name":"ANSWER","typehint":{"name":"int","nullable":false,"generics":[],"is_alias":false},"value":"42","is_abstract":false,"attributes":{},"docblock":null}"#);
}

#[test]
fn enum_value_serialization() {
    let parser =
        FileParser::from_data("<?hh\nenum Suit: string {\n  HEARTS = 'hearts';\n}\n").unwrap();
    let value = &parser.get_enum("Suit").unwrap().values[0];
    let json = serde_json::to_string(value).unwrap();
    assert_snapshot!(json, @r#"{"name":"HEARTS","value":"'hearts'"}"#);
}

mod core;
mod header;
mod keyvalue;
mod path;

pub use core::Parser;

#[cfg(test)]
mod tests {
    use tomlrs_util::Config;

    use super::Parser;
    use crate::value::Value;

    #[test]
    fn parses_simple_key_value() {
        let mut parser = Parser::new(Config::default());
        let doc = parser.parse(b"message = \"hi\"\n").unwrap();
        assert_eq!(doc.root().get("message"), Some(&Value::String("hi")));
    }

    #[test]
    fn parses_nested_table_headers() {
        let mut parser = Parser::new(Config::default());
        let doc = parser
            .parse(b"[servers.alpha]\nip = \"10.0.0.1\"\n")
            .unwrap();
        let servers = doc.root().get("servers").unwrap().as_table().unwrap();
        let alpha = servers.get("alpha").unwrap().as_table().unwrap();
        assert_eq!(alpha.get("ip"), Some(&Value::String("10.0.0.1")));
    }

    #[test]
    fn dotted_key_then_header_reopen_is_legal() {
        let mut parser = Parser::new(Config::default());
        let doc = parser
            .parse(b"[a.b]\nx = 1\n[a]\ny = 2\n")
            .unwrap();
        let a = doc.root().get("a").unwrap().as_table().unwrap();
        assert_eq!(a.get("y"), Some(&Value::Integer(2)));
        let b = a.get("b").unwrap().as_table().unwrap();
        assert_eq!(b.get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn dotted_key_created_table_rejects_later_header() {
        let mut parser = Parser::new(Config::default());
        let err = parser.parse(b"a.b = 1\n[a.b]\n").unwrap_err();
        assert_eq!(err.message, "table is closed to further definition");
    }

    #[test]
    fn header_adds_sub_table_beneath_a_dotted_key_closed_table() {
        let mut parser = Parser::new(Config::default());
        let doc = parser
            .parse(b"[fruit]\napple.color = \"red\"\n[fruit.apple.texture]\nsmooth = true\n")
            .unwrap();
        let fruit = doc.root().get("fruit").unwrap().as_table().unwrap();
        let apple = fruit.get("apple").unwrap().as_table().unwrap();
        assert_eq!(apple.get("color"), Some(&Value::String("red")));
        let texture = apple.get("texture").unwrap().as_table().unwrap();
        assert_eq!(texture.get("smooth"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn array_of_tables_accumulates_entries() {
        let mut parser = Parser::new(Config::default());
        let doc = parser
            .parse(b"[[fruits]]\nname = \"apple\"\n[[fruits]]\nname = \"banana\"\n")
            .unwrap();
        let fruits = match doc.root().get("fruits").unwrap() {
            Value::TablesArray(arr) => arr,
            other => panic!("expected array of tables, got {other:?}"),
        };
        assert_eq!(fruits.len(), 2);
        assert_eq!(
            fruits.iter().nth(1).unwrap().get("name"),
            Some(&Value::String("banana"))
        );
    }

    #[test]
    fn rejects_duplicate_key_in_same_table() {
        let mut parser = Parser::new(Config::default());
        let err = parser.parse(b"a = 1\na = 2\n").unwrap_err();
        assert_eq!(err.message, "redefinition of key");
    }

    #[test]
    fn inline_table_is_closed_to_further_mutation() {
        let mut parser = Parser::new(Config::default());
        let err = parser
            .parse(b"point = { x = 1, y = 2 }\n[point]\n")
            .unwrap_err();
        assert!(err.message.contains("closed to further definition"));
    }

    #[test]
    fn parses_array_of_mixed_nesting() {
        let mut parser = Parser::new(Config::default());
        let doc = parser.parse(b"a = [1, [2, 3], 4]\n").unwrap();
        match doc.root().get("a").unwrap() {
            Value::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::Integer(1));
                assert!(matches!(items[1], Value::Array(_)));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nesting_beyond_configured_limit() {
        let mut parser = Parser::new(Config::default().with_max_nesting(1));
        let err = parser.parse(b"[a.b]\n").unwrap_err();
        assert_eq!(err.message, "nesting-depth exceeded");
    }

    #[test]
    fn rejects_invalid_datetime() {
        let mut parser = Parser::new(Config::default());
        let err = parser.parse(b"d = 1977-02-29T07:32:00\n").unwrap_err();
        assert!(err.message.contains("day"));
    }

    #[test]
    fn resets_between_calls() {
        let mut parser = Parser::new(Config::default());
        {
            let doc = parser.parse(b"a = 1\n").unwrap();
            assert_eq!(doc.root().get("a"), Some(&Value::Integer(1)));
        }
        let doc = parser.parse(b"b = 2\n").unwrap();
        assert!(doc.root().get("a").is_none());
        assert_eq!(doc.root().get("b"), Some(&Value::Integer(2)));
    }
}

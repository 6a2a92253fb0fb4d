use brace_conf_core::{extract, split_lines, BlockError};
use pretty_assertions::assert_eq;

const NESTED: &str = "shared-network \"Office\" {
  subnet 10.0.0.0 netmask 255.255.255.0 {
    host pc1 {
      fixed-address 10.0.0.50;
    }
  }
}
option domain-name \"corp.local\";
";

#[test]
fn extracts_nested_block_and_advances_past_terminator() {
    let lines = split_lines(NESTED);
    let block = extract(&lines, 1).expect("balanced input");

    assert_eq!(block.start, 1);
    assert_eq!(block.next, 7);
    assert_eq!(block.terminator(), "}");
    assert_eq!(lines[block.next], "option domain-name \"corp.local\";");
}

#[test]
fn consumed_lines_reassemble_the_input_slice() {
    let lines = split_lines(NESTED);
    for start in [1, 2, 3] {
        let block = extract(&lines, start).expect("balanced input");
        assert!(block.next > start);

        let mut rebuilt: Vec<&str> = block.body().to_vec();
        rebuilt.push(block.terminator());
        assert_eq!(rebuilt, lines[start..block.next].to_vec());
    }
}

#[test]
fn text_is_verbatim_with_newlines() {
    let lines = split_lines("class \"x\" {\n  match if substring(a, 0, 1) = \"b\";\n}\n");
    let block = extract(&lines, 1).expect("balanced input");
    assert_eq!(
        block.text(),
        "  match if substring(a, 0, 1) = \"b\";\n}\n"
    );
}

#[test]
fn unterminated_block_is_an_error() {
    let lines = split_lines("shared-network X {\n  subnet 10.0.0.0 netmask 255.0.0.0 {\n  }\n");
    let err = extract(&lines, 1).expect_err("missing close brace");
    assert_eq!(err, BlockError::Unterminated { start: 1, depth: 1 });
}

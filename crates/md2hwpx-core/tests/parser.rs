//! Parser tests over whole documents

use md2hwpx_ast::Node;
use md2hwpx_core::parse;

const REPORT: &str = r#"# 월간 보고서

요약 문단에 **강조**와 [링크](https://example.kr)가 있습니다.

## 진행 상황

1. 설계
   - 초안 완료
   - 검토 중
2. 구현

> 인용문
>
> 두 번째 문단

| 항목 | 상태 |
|:-----|:----:|
| 파서 | 완료 |

```toml
[convert]
style = "business"
```

각주가 붙은 문장[^1].

[^1]: 각주 내용
"#;

#[test]
fn test_report_structure() {
    let doc = parse(REPORT);
    let kinds: Vec<&str> = doc.children.iter().map(Node::kind_name).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "heading",
            "ordered_list",
            "blockquote",
            "table",
            "code_block",
            "paragraph",
            "footnote_def",
        ]
    );
}

#[test]
fn test_nested_list_inside_loose_or_tight_item() {
    let doc = parse(REPORT);
    let Node::OrderedList { start, items } = &doc.children[3] else {
        panic!("expected ordered list");
    };
    assert_eq!(*start, 1);
    let Node::ListItem { children } = &items[0] else {
        panic!("expected item");
    };
    assert_eq!(children[0], Node::paragraph("설계"));
    let Node::UnorderedList { items: nested } = &children[1] else {
        panic!("expected nested list");
    };
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[1].plain_text(), "검토 중");
}

#[test]
fn test_blockquote_paragraphs() {
    let doc = parse(REPORT);
    let Node::Blockquote { children } = &doc.children[4] else {
        panic!("expected blockquote");
    };
    assert_eq!(
        children,
        &vec![Node::paragraph("인용문"), Node::paragraph("두 번째 문단")]
    );
}

#[test]
fn test_code_block_verbatim() {
    let doc = parse(REPORT);
    assert_eq!(
        doc.children[6],
        Node::CodeBlock {
            language: "toml".into(),
            text: "[convert]\nstyle = \"business\"\n".into(),
        }
    );
}

#[test]
fn test_plain_text_skips_urls() {
    let doc = parse("[보기](https://example.kr) ![그림](a.png)\n");
    assert_eq!(doc.plain_text(), "보기 ");
}

#[test]
fn test_indented_code_has_no_language() {
    let doc = parse("    let x = 1;\n");
    assert_eq!(
        doc.children[0],
        Node::CodeBlock {
            language: String::new(),
            text: "let x = 1;\n".into(),
        }
    );
}

use hl7v2_elements::parser::Message;
use hl7v2_elements::Element;
use pretty_assertions_sorted::assert_eq;

#[test]
fn element_trait_reads_uniformly_across_levels() {
    let msg = Message::parse("PID|1||12345^^^MRN~67890").unwrap();
    let seg = msg.segment(1).unwrap();
    let field = seg.field(3).unwrap();
    let rep = field.repetition(1).unwrap();
    let component = rep.component(1).unwrap();

    assert_eq!(Element::value(&seg).unwrap(), "PID|1||12345^^^MRN~67890");
    assert_eq!(Element::value(&field).unwrap(), "12345^^^MRN~67890");
    assert_eq!(Element::value(&rep).unwrap(), "12345^^^MRN");
    assert_eq!(Element::value(&component).unwrap(), "12345");

    assert_eq!(Element::delimiter(&seg), Some('|'));
    assert_eq!(Element::delimiter(&field), Some('~'));
    assert_eq!(Element::delimiter(&component), Some('&'));

    assert_eq!(field.count().unwrap(), 2);
    assert!(component.exists().unwrap());
}

#[test]
fn subcomponent_has_no_delimiter_and_zero_count() {
    let msg = Message::parse("PID|1||12345^^^MRN&suffix").unwrap();
    let component = msg
        .segment(1)
        .unwrap()
        .field(3)
        .unwrap()
        .repetition(1)
        .unwrap()
        .component(4)
        .unwrap();
    let sub = component.subcomponent(2).unwrap();
    assert_eq!(Element::delimiter(&sub), None);
    assert_eq!(Element::count(&sub).unwrap(), 0);
    assert_eq!(Element::value(&sub).unwrap(), "suffix");
}

#[test]
fn as_converter_reads_typed_values() {
    let msg = Message::parse("OBX|1|NM|^^^COUNT|1|42").unwrap();
    let field = msg.segment(1).unwrap().field(5).unwrap();
    let converter = field.as_converter().unwrap();
    assert_eq!(converter.as_int().unwrap(), 42);
}

#[test]
fn escape_and_unescape_go_through_the_element() {
    let msg = Message::parse("MSH|^~\\&|A").unwrap();
    let seg = msg.segment(1).unwrap();
    let escaped = seg.escape("a|b");
    assert_eq!(seg.unescape(&escaped), "a|b");
}

#[test]
fn has_significant_descendants_distinguishes_truly_empty_elements() {
    let msg = Message::parse("PID|1||").unwrap();
    let populated = msg.segment(1).unwrap().field(1).unwrap();
    let empty = msg.segment(1).unwrap().field(3).unwrap();
    assert!(populated.has_significant_descendants().unwrap());
    assert!(!empty.has_significant_descendants().unwrap());
}

use hl7v2_elements::parser::Message;
use pretty_assertions_sorted::assert_eq;

#[test]
fn header_round_trips_unchanged() {
    let text = "MSH|^~\\&|SENDER|FACILITY|RECEIVER|FACILITY2|20240101120000||ADT^A01|12345|P|2.5";
    let msg = Message::parse(text).unwrap();
    assert_eq!(msg.value(), text);
}

#[test]
fn field_index_matches_position() {
    let msg = Message::parse("MSH|^~\\&|A|B|C").unwrap();
    let seg = msg.segment(1).unwrap();
    assert_eq!(seg.field(3).unwrap().value().unwrap(), "A");
    assert_eq!(seg.field(3).unwrap().index(), 3);
    assert_eq!(seg.field(4).unwrap().value().unwrap(), "B");
    assert_eq!(seg.field(5).unwrap().value().unwrap(), "C");
}

#[test]
fn msh_field_one_is_the_delimiter_itself() {
    let msg = Message::parse("MSH|^~\\&|A").unwrap();
    let seg = msg.segment(1).unwrap();
    assert_eq!(seg.field(1).unwrap().value().unwrap(), "|");
    assert_eq!(seg.field(2).unwrap().value().unwrap(), "^~\\&");
    assert_eq!(seg.field(3).unwrap().value().unwrap(), "A");
}

#[test]
fn mutation_is_local_to_one_field() {
    let msg = Message::parse("MSH|^~\\&|A|B|C").unwrap();
    let seg = msg.segment(1).unwrap();
    seg.field(4).unwrap().set_value("changed").unwrap();
    assert_eq!(seg.field(3).unwrap().value().unwrap(), "A");
    assert_eq!(seg.field(4).unwrap().value().unwrap(), "changed");
    assert_eq!(seg.field(5).unwrap().value().unwrap(), "C");
    assert_eq!(msg.value(), "MSH|^~\\&|A|changed|C");
}

#[test]
fn deleting_fields_shifts_remaining_content_left() {
    // delete every even-numbered field at or beyond index 3
    let msg = Message::parse("MSH|^~\\&|1|2|3|4|5").unwrap();
    let seg = msg.segment(1).unwrap();
    seg.field(4).unwrap().delete().unwrap();
    seg.field(4).unwrap().delete().unwrap();
    assert_eq!(msg.value(), "MSH|^~\\&|1|3|5");
}

#[test]
fn cache_reflects_mutation_through_a_sibling_handle() {
    let msg = Message::parse("MSH|^~\\&|A|B").unwrap();
    let seg = msg.segment(1).unwrap();
    let field_before = seg.field(3).unwrap();
    assert_eq!(field_before.value().unwrap(), "A");
    // a second, independently-obtained handle mutates the same buffer
    let seg2 = msg.segment(1).unwrap();
    seg2.field(3).unwrap().set_value("Z").unwrap();
    // the first handle observes the write on its next read
    assert_eq!(field_before.value().unwrap(), "Z");
}

#[test]
fn sparse_repetitions_render_as_empty_gaps() {
    let msg = Message::parse("MSH|^~\\&|B~~A").unwrap();
    let field = msg.segment(1).unwrap().field(3).unwrap();
    assert_eq!(field.repetition(1).unwrap().value().unwrap(), "B");
    assert_eq!(field.repetition(2).unwrap().value().unwrap(), "");
    assert_eq!(field.repetition(3).unwrap().value().unwrap(), "A");
    assert_eq!(field.count().unwrap(), 3);
}

#[test]
fn escape_sequences_round_trip_through_separators() {
    let msg = Message::parse("MSH|^~\\&|A").unwrap();
    let separators = msg.separators();
    let raw = "a|b^c~d\\e&f";
    let escaped = separators.escape(raw);
    assert_eq!(separators.unescape(&escaped), raw);
}

#[test]
fn detached_clone_is_independent_of_the_source_buffer() {
    let msg = Message::parse("MSH|^~\\&|A|B").unwrap();
    let field = msg.segment(1).unwrap().field(3).unwrap();
    let detached = field.clone_detached().unwrap();
    field.set_value("mutated").unwrap();
    assert_eq!(field.value().unwrap(), "mutated");
    assert_eq!(detached.field().value().unwrap(), "A");
}

#[test]
fn component_write_through_parser_tree() {
    let msg = Message::parse("PID|1||12345^^^MRN").unwrap();
    let seg = msg.segment(1).unwrap();
    assert_eq!(seg.segment_type().unwrap(), "PID");
    let component = seg.field(3).unwrap().repetition(1).unwrap().component(1).unwrap();
    assert_eq!(component.value().unwrap(), "12345");
    component.set_value("99999").unwrap();
    assert_eq!(msg.value(), "PID|1||99999^^^MRN");
}

#[test]
fn segment_named_finds_first_match() {
    let msg = Message::parse("MSH|^~\\&|A\rPID|1\rOBX|1\rOBX|2").unwrap();
    let obx = msg.segment_named("OBX").unwrap().unwrap();
    assert_eq!(obx.field(1).unwrap().value().unwrap(), "1");
    assert!(msg.segment_named("ZZZ").unwrap().is_none());
}

#[test]
fn setting_msh_type_code_is_rejected() {
    let msg = Message::parse("MSH|^~\\&|A").unwrap();
    let seg = msg.segment(1).unwrap();
    assert!(seg.set_segment_type("ZZZ").is_err());
}

#[test]
fn message_count_ignores_trailing_empty_segments() {
    let msg = Message::parse("MSH|^~\\&|A\rPID|1\r\r").unwrap();
    assert_eq!(msg.count(), 2);
}

#[test]
fn high_index_access_does_not_panic_or_hang() {
    let msg = Message::parse("MSH|^~\\&|A").unwrap();
    let seg = msg.segment(1).unwrap();
    // padding out to a far index should remain linear, not quadratic;
    // this is a correctness check, not a timing assertion
    let field = seg.field(500).unwrap();
    assert_eq!(field.value().unwrap(), "");
    field.set_value("late").unwrap();
    assert_eq!(seg.field(500).unwrap().value().unwrap(), "late");
}

use hl7v2_elements::parser::Message;
use hl7v2_elements::{MessageBuilder, Separators};
use pretty_assertions_sorted::assert_eq;

#[test]
fn msh_header_serializes_without_a_doubled_delimiter() {
    let mut builder = MessageBuilder::new(Separators::default());
    builder.set_segment(1, "MSH");
    let separators = Separators::default();
    builder.set_field(1, 1, separators.field.to_string());
    builder.set_field(1, 2, "^~\\&");
    builder.set_field(1, 3, "SENDER");
    builder.set_field(1, 4, "FACILITY");
    assert_eq!(builder.value(), "MSH|^~\\&|SENDER|FACILITY");
}

#[test]
fn sparse_fields_render_as_empty_gaps() {
    let mut builder = MessageBuilder::new(Separators::default());
    builder.set_segment(1, "PID");
    builder.set_field(1, 3, "12345");
    assert_eq!(builder.value(), "PID|||12345");
}

#[test]
fn component_and_subcomponent_setters_compose() {
    let mut builder = MessageBuilder::new(Separators::default());
    builder.set_segment(1, "PID");
    builder.set_component(1, 3, 1, 1, "12345");
    builder.set_component(1, 3, 1, 4, "MRN");
    assert_eq!(builder.value(), "PID|||12345^^^MRN");

    builder.set_subcomponent(1, 5, 1, 1, 2, "Jane");
    assert_eq!(
        builder.segment(1).field(5).value(),
        "&Jane"
    );
}

#[test]
fn repetitions_join_on_the_repetition_delimiter() {
    let mut builder = MessageBuilder::new(Separators::default());
    builder.set_segment(1, "PID");
    builder.set_field_repetition(1, 3, 1, "B");
    builder.set_field_repetition(1, 3, 3, "A");
    assert_eq!(builder.segment(1).field(3).value(), "B~~A");
}

#[test]
fn count_is_zero_on_an_empty_builder() {
    let builder = MessageBuilder::default();
    assert_eq!(builder.count(), 0);
    assert_eq!(builder.value(), "");
}

#[test]
fn segment_named_finds_by_type_code() {
    let mut builder = MessageBuilder::new(Separators::default());
    builder.set_segment(1, "MSH");
    builder.set_segment(2, "PID");
    assert!(builder.segment_named("PID").is_some());
    assert!(builder.segment_named("OBX").is_none());
}

#[test]
fn from_parser_preserves_msh_field_alignment() {
    let text = "MSH|^~\\&|SENDER|FACILITY|RECEIVER|FACILITY2|20240101||ADT^A01|1|P|2.5";
    let parsed = Message::parse(text).unwrap();
    let builder = MessageBuilder::from_parser(&parsed).unwrap();
    assert_eq!(builder.value(), text);
}

#[test]
fn from_parser_round_trips_multi_segment_message() {
    let text = "MSH|^~\\&|A|B\rPID|1||12345^^^MRN\rOBX|1|ST|^^COMP|1|value";
    let parsed = Message::parse(text).unwrap();
    let builder = MessageBuilder::from_parser(&parsed).unwrap();
    assert_eq!(builder.value(), text);
}

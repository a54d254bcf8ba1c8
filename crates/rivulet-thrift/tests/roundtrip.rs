//! End-to-end tests over the public API: registry → resolver → schema,
//! decoder and encoder against each other, failure policies.

use std::sync::Arc;

use arrow_schema::DataType;
use rivulet_thrift::{
    DecodeError, EnumDescriptor, FailurePolicy, Row, SchemaError, StructDescriptor,
    StructRegistry, StructResolver, ThriftDecoder, ThriftEncoder, TypeDescriptor, Value,
    FIELD_ID_META_KEY,
};

fn shipment_resolver() -> StructResolver {
    let status = Arc::new(
        EnumDescriptor::new("Status")
            .with_case("PENDING", 0)
            .with_case("SHIPPED", 1)
            .with_case("LOST", 5),
    );

    let registry = Arc::new(StructRegistry::new());
    registry.register(
        StructDescriptor::new("Address")
            .with_field(1, "city", TypeDescriptor::text())
            .with_field(2, "zip", TypeDescriptor::I32),
    );
    registry.register(
        StructDescriptor::new("Shipment")
            .with_field(4, "status", TypeDescriptor::Enum(status))
            .with_field(1, "id", TypeDescriptor::I64)
            .with_field(6, "tags", TypeDescriptor::list(TypeDescriptor::text()))
            .with_field(2, "weight", TypeDescriptor::Double)
            .with_field(5, "destination", TypeDescriptor::struct_of("Address"))
            .with_field(3, "signature", TypeDescriptor::binary())
            .with_field(
                7,
                "extras",
                TypeDescriptor::map(TypeDescriptor::text(), TypeDescriptor::I64),
            ),
    );
    StructResolver::new(registry)
}

fn full_row() -> Row {
    Row::new(vec![
        Value::I64(1001),
        Value::Double(2.5),
        Value::Binary(vec![0xDE, 0xAD]),
        Value::I32(5),
        Value::Row(Row::new(vec![Value::Text("Lyon".into()), Value::I32(69000)])),
        Value::List(vec![Value::Text("fragile".into()), Value::Text("cold".into())]),
        Value::Map(vec![(Value::Text("attempts".into()), Value::I64(2))]),
    ])
}

#[test]
fn schema_columns_follow_field_id_order() {
    let resolver = shipment_resolver();
    let resolved = resolver.resolve("Shipment").expect("resolves");
    let schema = resolved.arrow_schema();

    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "weight", "signature", "status", "destination", "tags", "extras"]
    );

    // Declaration order above was deliberately shuffled; ids win.
    let ids: Vec<&String> = schema
        .fields()
        .iter()
        .map(|f| f.metadata().get(FIELD_ID_META_KEY).expect("id metadata"))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
}

#[test]
fn schema_distinguishes_text_and_binary() {
    let resolver = shipment_resolver();
    let schema = resolver.resolve("Shipment").expect("resolves").arrow_schema();

    assert_eq!(schema.field(2).data_type(), &DataType::Binary);
    match schema.field(4).data_type() {
        DataType::Struct(fields) => {
            assert_eq!(fields[0].data_type(), &DataType::Utf8);
        }
        other => panic!("expected struct column, got {other:?}"),
    }
}

#[test]
fn encode_decode_roundtrips_fully_set_row() {
    let resolver = shipment_resolver();
    let encoder =
        ThriftEncoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("enc");
    let mut decoder =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("dec");

    let row = full_row();
    let payload = encoder.encode(&row).expect("encodes");
    let decoded = decoder.decode(&payload).expect("decodes").expect("row");
    assert_eq!(decoded, row);
}

#[test]
fn null_composites_come_back_as_defaults() {
    let resolver = shipment_resolver();
    let encoder =
        ThriftEncoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("enc");
    let mut decoder =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("dec");

    let row = Row::new(vec![
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
    ]);
    let payload = encoder.encode(&row).expect("encodes");
    let decoded = decoder.decode(&payload).expect("decodes").expect("row");

    // Scalars materialize their zero defaults; composites stay null.
    assert_eq!(
        decoded,
        Row::new(vec![
            Value::I64(0),
            Value::Double(0.0),
            Value::Binary(vec![]),
            Value::I32(0),
            Value::Null,
            Value::Null,
            Value::Null,
        ])
    );
}

#[test]
fn defaults_then_reencode_is_stable() {
    // Decoding a default-filled payload and encoding the result again
    // must converge after one pass.
    let resolver = shipment_resolver();
    let encoder =
        ThriftEncoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("enc");
    let mut decoder =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("dec");

    let empty_payload = vec![0u8];
    let first = decoder.decode(&empty_payload).expect("decodes").expect("row");
    let reencoded = encoder.encode(&first).expect("encodes");
    let second = decoder.decode(&reencoded).expect("decodes").expect("row");
    assert_eq!(first, second);
}

#[test]
fn malformed_payloads_respect_policy() {
    let resolver = shipment_resolver();

    let mut strict =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("dec");
    assert!(matches!(
        strict.decode(b"garbage bytes").expect_err("strict fails"),
        DecodeError::MalformedPayload(_)
    ));

    let mut skip =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Skip).expect("dec");
    assert_eq!(skip.decode(b"garbage bytes").expect("skip swallows"), None);

    // A valid record right after still decodes.
    let encoder =
        ThriftEncoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("enc");
    let payload = encoder.encode(&full_row()).expect("encodes");
    assert!(skip.decode(&payload).expect("decodes").is_some());
}

#[test]
fn cross_type_payload_decodes_to_defaults() {
    // A payload written for one struct read as another: overlapping ids
    // with matching types carry over, everything else defaults.
    let resolver = shipment_resolver();
    let address_encoder =
        ThriftEncoder::from_resolver(&resolver, "Address", FailurePolicy::Strict).expect("enc");
    let mut shipment_decoder =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Strict).expect("dec");

    let address = Row::new(vec![Value::Text("Oslo".into()), Value::I32(150)]);
    let payload = address_encoder.encode(&address).expect("encodes");
    let decoded = shipment_decoder
        .decode(&payload)
        .expect("decodes")
        .expect("row");

    // Field 1 (text on wire, i64 declared) and field 2 (i32 on wire,
    // double declared) both fail to read and default.
    assert_eq!(decoded.get(0), Some(&Value::I64(0)));
    assert_eq!(decoded.get(1), Some(&Value::Double(0.0)));
    assert_eq!(shipment_decoder.defaulted_field_count(), 2);
}

#[test]
fn unknown_type_fails_at_construction_not_per_record() {
    let resolver = shipment_resolver();
    assert!(matches!(
        ThriftDecoder::from_resolver(&resolver, "Invoice", FailurePolicy::Skip)
            .err()
            .expect("unknown type"),
        SchemaError::UnresolvableType(name) if name == "Invoice"
    ));
}

#[test]
fn decoder_and_encoder_share_resolution() {
    let resolver = shipment_resolver();
    let decoder =
        ThriftDecoder::from_resolver(&resolver, "Shipment", FailurePolicy::Skip).expect("dec");
    let encoder =
        ThriftEncoder::from_resolver(&resolver, "Shipment", FailurePolicy::Skip).expect("enc");

    assert!(Arc::ptr_eq(decoder.struct_type(), encoder.struct_type()));
    assert_eq!(decoder.output_schema(), encoder.input_schema());
}

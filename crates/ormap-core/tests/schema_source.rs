use ormap_core::schema::DataSource;
use pretty_assertions::assert_eq;

#[test]
fn descriptor_fields_default_when_omitted() {
    let source: DataSource = serde_json::from_str(r#"{ "name": "archive" }"#).unwrap();

    assert_eq!(source, DataSource::new("archive"));
    assert_eq!(source.priority, 0);
    assert!(source.read && source.write && source.optimize);
}

#[test]
fn descriptors_load_from_json() {
    let sources: Vec<DataSource> = serde_json::from_str(
        r#"[
            { "name": "main", "priority": 10 },
            { "name": "reporting", "write": false, "optimize": false }
        ]"#,
    )
    .unwrap();

    assert_eq!(
        sources,
        [
            DataSource::new("main").priority(10),
            DataSource::new("reporting").write(false).optimize(false),
        ]
    );
}

#[test]
fn descriptor_serializes_every_field() {
    let json = serde_json::to_value(DataSource::new("main").read(false)).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "main",
            "priority": 0,
            "read": false,
            "write": true,
            "optimize": true,
        })
    );
}

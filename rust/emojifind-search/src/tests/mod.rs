
use crate::{Document, FieldParams, SearchConfig, SearchIndex};

/// Two-field index over a handful of emoji-like documents
pub(crate) fn sample_index() -> SearchIndex {
    let config = SearchConfig {
        id_field: "emoji".into(),
        fields: vec![FieldParams::new("title", 13.0), FieldParams::new("keywords", 8.0)],
        store_fields: vec!["slug".into()],
        prefix: true,
        ..SearchConfig::default()
    };
    let mut index = SearchIndex::new(config).unwrap();
    let docs = vec![
        Document::new("😀")
            .with_field("title", "Grinning Face")
            .with_field("keywords", "face grin")
            .with_stored("slug", "grinning-face"),
        Document::new("😁")
            .with_field("title", "Beaming Face Smiling Eyes")
            .with_field("keywords", "eye face grin smile")
            .with_stored("slug", "beaming-face-smiling-eyes"),
        Document::new("🐶")
            .with_field("title", "Dog Face")
            .with_field("keywords", "dog pet")
            .with_stored("slug", "dog-face"),
    ];
    index.add_all(&docs).unwrap();
    index
}

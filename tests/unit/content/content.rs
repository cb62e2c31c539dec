use super::*;
use serde_json::json;

#[test]
fn default_content_has_six_cards_in_order() {
    let content = ContentSet::default();
    content.validate().unwrap();
    assert_eq!(
        content.icon_sequence(),
        vec![
            IconType::Chess,
            IconType::Basketball,
            IconType::Dragon,
            IconType::Starve,
            IconType::Running,
            IconType::Career,
        ]
    );
    assert_eq!(content.card("dragon").unwrap().title, "龙族");
    assert_eq!(
        content.card("chess").unwrap().accent,
        Rgba8::rgb(0x8A, 0x2B, 0x27)
    );
    assert!(content.card("missing").is_none());
}

#[test]
fn reader_accepts_camel_case_aliases() {
    let raw = json!({
        "cards": [
            {
                "id": "a",
                "title": "A",
                "iconType": "running",
                "accentColor": "#4A8FBF",
                "copy": "run"
            },
            {
                "id": "b",
                "title": "B",
                "icon": "cake",
                "accent": "#D4B96A",
                "copy": "eat"
            }
        ]
    });
    let content = ContentSet::from_reader(raw.to_string().as_bytes()).unwrap();
    assert_eq!(content.theme, Theme::default());
    assert_eq!(
        content.icon_sequence(),
        vec![IconType::Running, IconType::Cake]
    );
}

#[test]
fn validate_rejects_duplicates_and_empty() {
    let mut content = ContentSet::default();
    content.cards[1].id = "chess".to_owned();
    let err = content.validate().unwrap_err().to_string();
    assert!(err.contains("duplicate card id 'chess'"), "{err}");

    let empty = ContentSet {
        theme: Theme::default(),
        cards: vec![],
    };
    assert!(empty.validate().is_err());

    let raw = json!({"cards": [{"id": " ", "title": "t", "icon": "chess", "accent": "#000000", "copy": ""}]});
    assert!(ContentSet::from_reader(raw.to_string().as_bytes()).is_err());
}

#[test]
fn from_path_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    let f = std::fs::File::create(&path).unwrap();
    serde_json::to_writer_pretty(f, &ContentSet::default()).unwrap();

    let loaded = ContentSet::from_path(&path).unwrap();
    assert_eq!(loaded, ContentSet::default());

    let missing = ContentSet::from_path(dir.path().join("nope.json"));
    assert!(missing.unwrap_err().to_string().contains("open content JSON"));
}

#[test]
fn icon_names_roundtrip() {
    for icon in IconType::ALL {
        assert_eq!(IconType::parse(icon.as_str()), Some(icon));
    }
    assert_eq!(IconType::parse("rocket"), None);
}

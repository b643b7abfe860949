mod common;

use less_sprites_core::prelude::*;
use less_sprites_core::is_truthy;
use serde_json::json;

#[test]
fn defaults_derive_from_spec_file_name_and_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let spec = common::write_spec(&root, "icons.json", "{}");
    let cfg = SpriteConfig::load(&spec).expect("load");

    assert_eq!(cfg.source_dir, root);
    assert_eq!(cfg.sprite_path, root.join("icons.png"));
    assert_eq!(cfg.style_path, root.join("icons.less"));
    assert_eq!(cfg.direction, Direction::Down);
    assert!(!cfg.scan_dirs);
    assert!(cfg.files.is_none());
    assert_eq!(cfg.img_path, "");
    assert_eq!(cfg.spec_path.as_deref(), Some(spec.as_path()));
}

#[test]
fn relative_paths_resolve_against_spec_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    std::fs::create_dir_all(root.join("conf")).unwrap();
    let spec = common::write_spec(
        &root.join("conf"),
        "sprites.json",
        r#"{"dir": "../icons", "sprite": "../out/s.png", "less": "styles/s.less", "imgPath": "img", "direction": "right", "scanDirs": true, "files": ["b.png", "a.png"]}"#,
    );
    let cfg = SpriteConfig::load(&spec).expect("load");

    assert_eq!(cfg.source_dir, root.join("icons"));
    assert_eq!(cfg.sprite_path, root.join("out/s.png"));
    assert_eq!(cfg.style_path, root.join("conf/styles/s.less"));
    assert_eq!(cfg.img_path, "img");
    assert_eq!(cfg.direction, Direction::Right);
    assert!(cfg.scan_dirs);
    assert_eq!(cfg.files, Some(vec!["b.png".to_string(), "a.png".to_string()]));
}

#[test]
fn absolute_output_paths_are_kept() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let abs = root.join("elsewhere").join("sheet.png");
    let body = json!({"sprite": abs.to_string_lossy()}).to_string();
    let spec = common::write_spec(&root, "s.json", &body);
    let cfg = SpriteConfig::load(&spec).expect("load");
    assert_eq!(cfg.sprite_path, abs);
}

#[test]
fn unknown_direction_stacks_downward() {
    assert_eq!(Direction::from_spec(Some("left")), Direction::Down);
    assert_eq!(Direction::from_spec(Some("right")), Direction::Right);
    assert_eq!(Direction::from_spec(None), Direction::Down);
}

#[test]
fn non_string_direction_stacks_downward() {
    let tmp = tempfile::tempdir().unwrap();
    for (i, direction) in ["true", "1", "{}", "null", "[\"right\"]"].iter().enumerate() {
        let spec = common::write_spec(
            tmp.path(),
            &format!("s{i}.json"),
            &format!(r#"{{"direction": {direction}}}"#),
        );
        let cfg = SpriteConfig::load(&spec).expect("load");
        assert_eq!(cfg.direction, Direction::Down, "direction {direction}");
    }
    let spec = common::write_spec(tmp.path(), "caps.json", r#"{"direction": "Right"}"#);
    let cfg = SpriteConfig::load(&spec).expect("load");
    assert_eq!(cfg.direction, Direction::Down);
}

#[test]
fn scan_dirs_uses_truthiness() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!("yes")));
    assert!(is_truthy(&json!([])));
}

#[test]
fn missing_spec_file_is_invalid_spec() {
    let tmp = tempfile::tempdir().unwrap();
    let err = SpriteConfig::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SpriteError::InvalidSpec { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn malformed_json_is_invalid_spec() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = common::write_spec(tmp.path(), "bad.json", "{ dir: ");
    match SpriteConfig::load(&spec) {
        Err(SpriteError::InvalidSpec { reason, .. }) => assert!(!reason.is_empty()),
        other => panic!("expected InvalidSpec, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_json_suffix_is_kept_in_default_names() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let spec = common::write_spec(&root, "sprites.conf", "{}");
    let cfg = SpriteConfig::load(&spec).expect("load");
    assert_eq!(cfg.sprite_path, root.join("sprites.conf.png"));
    assert_eq!(cfg.style_path, root.join("sprites.conf.less"));
}

#[test]
fn exit_codes_are_distinct_per_kind() {
    let io = || std::io::Error::other("disk full");
    let errs = [
        SpriteError::InvalidSpec {
            path: "s.json".into(),
            reason: "x".into(),
        },
        SpriteError::NoSourceFiles { dir: "d".into() },
        SpriteError::MissingSourceFile {
            path: "a.png".into(),
        },
        SpriteError::Imaging {
            path: "a.png".into(),
            message: "x".into(),
        },
        SpriteError::OutputWrite {
            path: "s.png".into(),
            source: io(),
        },
    ];
    let codes: Vec<u8> = errs.iter().map(|e| e.exit_code()).collect();
    assert_eq!(codes, vec![1, 2, 3, 4, 5]);
}

#[test]
fn builder_resolves_outputs_against_source_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let cfg = SpriteConfig::builder(&root)
        .sprite_path("../sheet.png")
        .style_path("sheet.less")
        .direction(Direction::Right)
        .files(["a.png"])
        .build();
    assert_eq!(cfg.sprite_path, root.parent().unwrap().join("sheet.png"));
    assert_eq!(cfg.style_path, root.join("sheet.less"));
    assert_eq!(cfg.files.as_deref(), Some(&["a.png".to_string()][..]));
    cfg.validate().expect("valid");
}

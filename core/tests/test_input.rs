// Image data input, configuration files and the populate driver.

#[cfg(test)]
mod tests {
    use std::fs;

    use trait_pager::config::{ConfigError, PagerConfig, SubmitConfig};
    use trait_pager::framing::FrameLayout;
    use trait_pager::input::{ImageData, InputError};
    use trait_pager::populate::populate;
    use trait_pager::recovery::SubmissionJournal;
    use trait_pager::registry::InMemoryRegistry;
    use trait_pager::types::PagerError;
    use trait_pager::utils::decode_hex;

    const IMAGE_DATA: &str = r##"{
        "bgcolors": ["d5d7e1", "e1d7d5"],
        "palette": ["", "ffffff", "c5b9a1", "#7f7f7f"],
        "images": {
            "bodies": [
                { "filename": "body-bege", "data": "0x0015171f090e020e030e040e" },
                { "filename": "body-blue", "data": "0x0015171f090e050e060e070e" }
            ],
            "accessories": [
                { "filename": "accessory-bars", "data": "0x0017141808040102" }
            ],
            "heads": [
                { "filename": "head-aardvark", "data": "0x00061a1d0a0103010401" },
                { "data": "0x00061a1d0a01050106" },
                { "filename": "head-abstract", "data": "0X00061A1D0A010701" }
            ],
            "glasses": []
        }
    }"##;

// # 1. Image data parsing

    #[test]
    fn categories_keep_file_order() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let names: Vec<&str> = data.category_names().collect();
        assert_eq!(names, vec!["bodies", "accessories", "heads", "glasses"]);
        assert_eq!(data.bgcolors, vec!["d5d7e1".to_string(), "e1d7d5".to_string()]);
        assert_eq!(data.images[2].entries[1].filename, "");
    }

    #[test]
    fn collections_decode_hex_records() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let collections = data.collections().unwrap();
        assert_eq!(collections.len(), 4);
        assert_eq!(collections[0].category, "bodies");
        assert_eq!(collections[0].records[0][..5], [0x00, 0x15, 0x17, 0x1f, 0x09]);
        assert_eq!(collections[2].records[2], vec![0x00, 0x06, 0x1a, 0x1d, 0x0a, 0x01, 0x07, 0x01]);
        assert!(collections[3].is_empty());
    }

    #[test]
    fn palette_starts_transparent() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        assert_eq!(
            data.palette_bytes().unwrap(),
            vec![0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xc5, 0xb9, 0xa1, 0x7f, 0x7f, 0x7f]
        );
    }

    #[test]
    fn short_palette_color_is_rejected() {
        let json = r#"{ "palette": ["", "fff"], "images": {} }"#;
        let data = ImageData::from_json_str(json).unwrap();
        assert_eq!(
            data.palette_bytes(),
            Err(InputError::InvalidColor { index: 1, value: "fff".into() })
        );
    }

    #[test]
    fn bad_record_hex_names_category_and_index() {
        let json = r#"{ "images": { "heads": [ { "data": "0x00" }, { "data": "0x0g" } ] } }"#;
        let data = ImageData::from_json_str(json).unwrap();
        assert!(matches!(
            data.collections(),
            Err(InputError::InvalidHex { category, index: 1, .. }) if category == "heads"
        ));
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let json = r#"{ "images": { "heads": [], "bodies": [], "heads": [] } }"#;
        assert_eq!(ImageData::from_json_str(json), Err(InputError::DuplicateCategory("heads".into())));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(ImageData::from_json_str("{ \"images\": "), Err(InputError::Parse(_))));
        assert!(matches!(ImageData::from_json_str("{}"), Err(InputError::Parse(_))));
    }

    #[test]
    fn image_data_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image-data.json");
        fs::write(&path, IMAGE_DATA).unwrap();
        assert_eq!(ImageData::from_path(&path).unwrap(), ImageData::from_json_str(IMAGE_DATA).unwrap());
        assert!(matches!(ImageData::from_path(dir.path().join("missing.json")), Err(InputError::Io(_))));
    }

    #[test]
    fn hex_prefix_is_optional() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode_hex("0A0B").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode_hex("0x").unwrap().is_empty());
        assert!(decode_hex("0x123").is_err());
    }

// # 2. Configuration

    #[test]
    fn pager_config_from_json() {
        let cfg = PagerConfig::from_json_str(r#"{ "max_payload_bytes": 12000, "layout": "abi_bytes_array" }"#).unwrap();
        assert_eq!(cfg.budget(), Ok(12000));
        assert_eq!(cfg.layout, FrameLayout::AbiBytesArray);
        assert_eq!(cfg.level, 9);
        assert!(cfg.verify);
    }

    #[test]
    fn pager_config_requires_budget() {
        assert_eq!(PagerConfig::from_json_str("{}"), Err(ConfigError::MissingBudget));
        assert_eq!(
            PagerConfig::from_json_str(r#"{ "max_payload_bytes": 0 }"#),
            Err(ConfigError::MissingBudget)
        );
        assert_eq!(
            PagerConfig::from_json_str(r#"{ "max_payload_bytes": 100, "level": 10 }"#),
            Err(ConfigError::InvalidLevel(10))
        );
        assert!(matches!(PagerConfig::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn pager_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pager.json");
        fs::write(&path, r#"{ "max_payload_bytes": 2048, "level": 6, "verify": false }"#).unwrap();
        let cfg = PagerConfig::from_path(&path).unwrap();
        assert_eq!(cfg, PagerConfig::new(2048).with_level(6).with_verify(false));
    }

    #[test]
    fn submit_config_defaults() {
        let cfg: SubmitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SubmitConfig::default());
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.base_index, None);
        assert_eq!(cfg.retry_backoff_ms, 25);
        assert_eq!(cfg.backoff(2), std::time::Duration::from_millis(50));
        assert!(cfg.validate().is_ok());
    }

// # 3. Populate

    #[test]
    fn populate_fills_registry_in_order() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::Packed);

        let report = populate(&mut registry, &data, &PagerConfig::new(4096), &SubmitConfig::default(), None).unwrap();

        assert_eq!(report.backgrounds, 2);
        assert_eq!(report.palette_bytes, 12);
        assert_eq!(registry.backgrounds(), data.bgcolors.as_slice());
        assert_eq!(registry.palette(0), Some(data.palette_bytes().unwrap().as_slice()));

        let order: Vec<&str> = report.categories.iter().map(|c| c.submission.category.as_str()).collect();
        assert_eq!(order, vec!["bodies", "accessories", "heads", "glasses"]);
        for (collection, cat) in data.collections().unwrap().iter().zip(&report.categories) {
            assert_eq!(registry.records(&collection.category), collection.records.as_slice());
            assert_eq!(cat.submission.final_count, collection.len() as u64);
            assert!(cat.plan.sanity_check());
        }

        // The empty category plans one empty page and appends nothing.
        assert_eq!(report.categories[3].submission.pages_skipped, 1);
        assert_eq!(registry.appends(), 3);
        assert!(serde_json::to_string(&report).is_ok());
    }

    #[test]
    fn populate_with_abi_layout() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::AbiBytesArray);
        let pager = PagerConfig::new(4096).with_layout(FrameLayout::AbiBytesArray);

        populate(&mut registry, &data, &pager, &SubmitConfig::default(), None).unwrap();
        assert_eq!(registry.records("heads").len(), 3);
    }

    #[test]
    fn populate_journals_every_page() {
        let dir = tempfile::tempdir().unwrap();
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::Packed);
        let mut journal = SubmissionJournal::open(dir.path().join("populate.journal")).unwrap();

        populate(&mut registry, &data, &PagerConfig::new(4096), &SubmitConfig::default(), Some(&mut journal)).unwrap();
        assert_eq!(journal.entries().len(), 3);
        assert_eq!(journal.last_acknowledged("heads"), Some(3));
        assert_eq!(journal.last_acknowledged("glasses"), None);
    }

    #[test]
    fn bad_input_fails_before_any_call() {
        let json = r#"{ "bgcolors": ["d5d7e1"], "images": { "heads": [ { "data": "0xnothex" } ] } }"#;
        let data = ImageData::from_json_str(json).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::Packed);

        let err = populate(&mut registry, &data, &PagerConfig::new(4096), &SubmitConfig::default(), None).unwrap_err();
        assert!(matches!(err, PagerError::Input(InputError::InvalidHex { .. })));
        assert!(registry.backgrounds().is_empty());
        assert_eq!(registry.palette(0), None);
    }

    #[test]
    fn populate_without_budget_is_a_config_error() {
        let data = ImageData::from_json_str(IMAGE_DATA).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::Packed);
        assert_eq!(
            populate(&mut registry, &data, &PagerConfig::default(), &SubmitConfig::default(), None).unwrap_err(),
            PagerError::Config(ConfigError::MissingBudget)
        );
    }

    #[test]
    fn oversized_record_aborts_populate() {
        let big = format!("0x{}", "ab".repeat(64));
        let json = format!(r#"{{ "images": {{ "heads": [ {{ "data": "{}" }} ] }} }}"#, big);
        let data = ImageData::from_json_str(&json).unwrap();
        let mut registry = InMemoryRegistry::new(FrameLayout::Packed);

        let err = populate(&mut registry, &data, &PagerConfig::new(8).with_level(0), &SubmitConfig::default(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            PagerError::Plan(trait_pager::pager::PlanError::RecordTooLarge { index: 0, .. })
        ));
        assert!(registry.records("heads").is_empty());
    }
}

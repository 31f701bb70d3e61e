use std::fs;

use speculate2::speculate;
use tintnotes::*;

fn titled(title: &str) -> Note {
    Note::new(NoteFields::titled(title))
}

fn titles<S: KeyValueStore>(store: &NoteStore<S>) -> Vec<String> {
    store.list().iter().map(|n| n.title.clone()).collect()
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = dir.path().join("data");
    }

    describe "a store backed by files" {
        it "starts empty when nothing was saved" {
            let store = NoteStore::open(FileStore::new(&data_dir));
            assert!(store.is_empty());
            assert_eq!(store.load_status(), &LoadStatus::Empty);
        }

        it "survives a restart after add, add, delete" {
            let mut store = NoteStore::open(FileStore::new(&data_dir));
            store.add(titled("A"));
            store.add(titled("B"));
            assert_eq!(titles(&store), ["B", "A"]);

            store.delete([0]);
            assert_eq!(titles(&store), ["A"]);
            let before = store.list().to_vec();
            drop(store);

            let reopened = NoteStore::open(FileStore::new(&data_dir));
            assert_eq!(reopened.load_status(), &LoadStatus::Restored(1));
            assert_eq!(reopened.list(), &before[..]);
        }

        it "keeps update order across a restart" {
            let mut store = NoteStore::open(FileStore::new(&data_dir));
            for title in ["one", "two", "three"] {
                store.add(titled(title));
            }
            let mut oldest = store.list()[2].clone();
            oldest.update_content(NoteFields {
                color_tag: ColorTag::custom(Rgb::new(0x12, 0x34, 0x56)),
                location: "Harbour".into(),
                ..oldest.fields()
            });
            assert!(store.update(oldest.clone()));
            drop(store);

            let reopened = NoteStore::open(FileStore::new(&data_dir));
            assert_eq!(titles(&reopened), ["one", "three", "two"]);
            assert_eq!(reopened.list()[0], oldest);
            assert_eq!(reopened.list()[0].color_tag.color(), Rgb::new(0x12, 0x34, 0x56));
        }

        it "writes the slot as a JSON array of camelCase records" {
            let mut store = NoteStore::open(FileStore::new(&data_dir));
            store.add(Note::new(NoteFields {
                color_tag: ColorTag::Orange,
                ..NoteFields::titled("shape")
            }));

            let raw = fs::read_to_string(data_dir.join("notes.json")).expect("slot file");
            let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
            let record = &value.as_array().expect("array")[0];
            assert_eq!(record["title"], "shape");
            assert_eq!(record["colorTag"], "orange");
            assert!(record["customColorHex"].is_null());
            for key in ["id", "content", "location", "date", "dateCreated", "dateModified"] {
                assert!(record.get(key).is_some(), "missing {}", key);
            }
        }

        it "recovers from a corrupt slot and overwrites it on the next save" {
            fs::create_dir_all(&data_dir).unwrap();
            fs::write(data_dir.join("notes.json"), "[{\"id\": 42}").unwrap();

            let mut store = NoteStore::open(FileStore::new(&data_dir));
            assert!(store.is_empty());
            assert!(matches!(store.load_status(), LoadStatus::Recovered(_)));

            store.add(titled("fresh start"));
            let reopened = NoteStore::open(FileStore::new(&data_dir));
            assert_eq!(titles(&reopened), ["fresh start"]);
        }

        it "keeps working in memory when the slot cannot be written" {
            fs::write(&data_dir, "a file where the directory should be").unwrap();

            let mut store = NoteStore::open(FileStore::new(&data_dir));
            store.add(titled("unsaved"));
            assert_eq!(titles(&store), ["unsaved"]);
        }
    }

    describe "searching the store" {
        it "filters case-insensitively without touching the list" {
            let mut store = NoteStore::open(MemoryStore::new());
            store.add(titled("Grocery List"));
            store.add(Note::new(NoteFields {
                location: "Grocery store".into(),
                ..NoteFields::titled("Receipt")
            }));
            store.add(titled("Unrelated"));

            let hits: Vec<_> = filter(store.list(), "grocery").into_iter().map(|n| n.title.as_str()).collect();
            assert_eq!(hits, ["Receipt", "Grocery List"]);
            assert_eq!(filter(store.list(), "").len(), 3);
            assert!(filter(store.list(), "xyz").is_empty());
            assert_eq!(store.len(), 3);
        }
    }
}

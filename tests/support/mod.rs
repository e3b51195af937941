#![allow(dead_code)]

use linkdefs::{DefinitionIndex, LinkDefinition};

pub fn expect_definition<'a>(index: &'a DefinitionIndex, id: &str) -> &'a LinkDefinition {
    match index.get(id) {
        Some(def) => def,
        None => panic!("no definition for {id:?}; index has {:?}", index.iter().collect::<Vec<_>>()),
    }
}

pub fn assert_definition(
    index: &DefinitionIndex,
    id: &str,
    expected_id: &str,
    url: &str,
    title: Option<&str>,
) {
    let def = expect_definition(index, id);
    assert_eq!(def.id, expected_id, "id for lookup {id:?}");
    assert_eq!(def.url, url, "url for lookup {id:?}");
    assert_eq!(def.title.as_deref(), title, "title for lookup {id:?}");
}

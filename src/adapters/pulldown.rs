use pulldown_cmark::{BrokenLink, CowStr, Event, Options as PulldownOptions, Parser};

use crate::index::DefinitionIndex;
use crate::options::Options;
use crate::scan::scan_with_options;

#[derive(Debug, Clone)]
pub struct PulldownAdapterOptions {
    pub pulldown: PulldownOptions,
    pub definitions: Options,
}

impl Default for PulldownAdapterOptions {
    fn default() -> Self {
        Self {
            pulldown: PulldownOptions::empty(),
            definitions: Options::default(),
        }
    }
}

/// Parses Markdown with pulldown-cmark, resolving references it cannot resolve itself against a
/// [`DefinitionIndex`].
///
/// pulldown-cmark only honours CommonMark definitions. The index may also hold declarations that
/// CommonMark rejects (deep indentation, mid-line), which this adapter makes visible to it.
#[derive(Debug, Default)]
pub struct PulldownAdapter {
    opts: PulldownAdapterOptions,
    index: DefinitionIndex,
}

impl PulldownAdapter {
    pub fn new(opts: PulldownAdapterOptions) -> Self {
        Self {
            opts,
            index: DefinitionIndex::default(),
        }
    }

    pub fn with_index(opts: PulldownAdapterOptions, index: DefinitionIndex) -> Self {
        Self { opts, index }
    }

    pub fn index(&self) -> &DefinitionIndex {
        &self.index
    }

    /// Replaces the current index with the definitions of `document`.
    pub fn load(&mut self, document: &str) {
        self.index = scan_with_options(document, &self.opts.definitions);
    }

    pub fn clear(&mut self) {
        self.index = DefinitionIndex::default();
    }

    pub fn parse(&self, input: &str) -> Vec<Event<'static>> {
        parse_with_index(input, &self.index, self.opts.pulldown)
    }
}

pub fn parse_with_index(
    input: &str,
    index: &DefinitionIndex,
    options: PulldownOptions,
) -> Vec<Event<'static>> {
    let callback = |link: BrokenLink| {
        let def = index.get(&link.reference)?;
        tracing::trace!(reference = %link.reference, url = %def.url, "resolved from index");
        let url: CowStr = def.url.clone().into();
        let title: CowStr = def.title.clone().unwrap_or_default().into();
        Some((url, title))
    };
    Parser::new_with_broken_link_callback(input, options, Some(callback))
        .map(|e| e.into_static())
        .collect()
}

/// Scans `input` for definitions, then parses it against them.
pub fn scan_and_parse(
    input: &str,
    definitions: &Options,
    options: PulldownOptions,
) -> Vec<Event<'static>> {
    let index = scan_with_options(input, definitions);
    parse_with_index(input, &index, options)
}

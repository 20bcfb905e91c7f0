use crate::models::Pgn;
use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use std::collections::HashMap;
use std::fmt::Write;
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Collects every tag pair into a header map and accumulates the mainline
/// movetext into a single string where white's move carries a `"N. "` prefix
/// and every token is followed by one space. Variations are skipped; the
/// result marker is already present as the `Result` tag.
pub struct PgnVisitor {
    headers: HashMap<String, String>,
    move_count: u32,
}

impl PgnVisitor {
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            move_count: 0,
        }
    }
}

impl Default for PgnVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for PgnVisitor {
    type Tags = ();
    type Movetext = String;
    type Output = Pgn;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.move_count = 0;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.insert(
            String::from_utf8_lossy(key).into_owned(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(String::with_capacity(256))
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        if self.move_count % 2 == 0 {
            let _ = write!(movetext, "{}. {} ", self.move_count / 2 + 1, san);
        } else {
            let _ = write!(movetext, "{} ", san);
        }
        self.move_count += 1;
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        Pgn {
            headers: mem::take(&mut self.headers),
            moves: movetext,
        }
    }
}

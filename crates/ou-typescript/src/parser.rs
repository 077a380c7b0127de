use crate::location::LocationConverter;
use anyhow::Result;
use std::path::{Path, PathBuf};
use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

/// A parsed TypeScript source file
pub struct ParsedFile {
    pub path: PathBuf,
    pub module: Module,
    pub converter: LocationConverter,
    /// Start of this file within the shared SourceMap. Spans carry global
    /// byte positions, so per-file offsets are `span.lo - start_pos`.
    start_pos: u32,
}

impl ParsedFile {
    /// 1-based line number for a global span position
    pub fn line_at(&self, span_lo: u32) -> usize {
        let offset = span_lo.saturating_sub(self.start_pos) as usize;
        self.converter.byte_offset_to_location(offset).0
    }
}

/// TypeScript file parser (via swc)
pub struct SourceParser {
    source_map: SourceMap,
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            source_map: SourceMap::default(),
        }
    }

    /// Reads and parses a file. `.tsx` files get JSX syntax enabled.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read_to_string(path)?;
        self.parse_source(&source, path)
    }

    /// Parses source text under the given file name
    pub fn parse_source(&self, source: &str, path: &Path) -> Result<ParsedFile> {
        let file_name: Lrc<FileName> = FileName::Real(path.to_path_buf()).into();
        let fm = self
            .source_map
            .new_source_file(file_name, source.to_string());

        let is_tsx = path.extension().and_then(|e| e.to_str()) == Some("tsx");
        let syntax = Syntax::Typescript(TsSyntax {
            tsx: is_tsx,
            ..Default::default()
        });

        let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
        let mut parser = Parser::new_from(lexer);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow::anyhow!("Parse error in {:?}: {:?}", path, e))?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            module,
            converter: LocationConverter::new(source),
            start_pos: fm.start_pos.0,
        })
    }
}

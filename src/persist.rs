use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::classifier::{filter::TokenFilter, record::CorpusRecord, Corpus};
use crate::error::Result;

/// On-disk encoding of a [`CorpusRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Pretty-printed JSON, readable by hand.
    #[default]
    Json,
    /// Compact CBOR.
    Cbor,
}

impl Format {
    /// `.cbor` selects CBOR, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("cbor") => Format::Cbor,
            _ => Format::Json,
        }
    }
}

/// 文書データの保存・読み出し
impl Corpus {
    /// Save to `path`, picking the format from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.save_as(path, Format::from_path(path))
    }

    /// Save to `path` in the given format.
    ///
    /// The record is written to a temporary file next to the target and then
    /// renamed over it, so a failed save never leaves a truncated file.
    pub fn save_as<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let record = CorpusRecord::from(self);
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            match format {
                Format::Json => serde_json::to_writer_pretty(&mut writer, &record)?,
                Format::Cbor => serde_cbor::to_writer(&mut writer, &record)?,
            }
            writer.flush()?;
        }
        // 既存ファイルのパーミッションを引き継ぐ
        if let Ok(meta) = fs::metadata(path) {
            if meta.is_file() {
                temp.as_file().set_permissions(meta.permissions())?;
            }
        }
        temp.persist(path).map_err(|e| e.error)?;

        log::info!(
            "saved corpus to {} ({:?}): {} labels, {} words, {} documents",
            path.display(),
            format,
            record.label_count,
            record.word_count,
            record.doc_count
        );
        Ok(())
    }

    /// Load from `path`, picking the format from the extension.
    /// The loaded corpus filters nothing but empty tokens.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Corpus> {
        let path = path.as_ref();
        Self::load_as(path, Format::from_path(path))
    }

    /// Load from `path` and attach `filter`.
    pub fn load_with_filter<P: AsRef<Path>>(path: P, filter: TokenFilter) -> Result<Corpus> {
        Ok(Self::load(path)?.with_filter(filter))
    }

    pub fn load_as<P: AsRef<Path>>(path: P, format: Format) -> Result<Corpus> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let record: CorpusRecord = match format {
            Format::Json => serde_json::from_reader(reader)?,
            Format::Cbor => serde_cbor::from_reader(reader)?,
        };
        let corpus = record.into_corpus()?;
        log::info!(
            "loaded corpus from {} ({:?}): {} labels, {} words, {} documents",
            path.display(),
            format,
            corpus.label_count(),
            corpus.word_count(),
            corpus.doc_count()
        );
        Ok(corpus)
    }

    /// Pretty-printed JSON form of the record.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&CorpusRecord::from(self))?)
    }

    pub fn from_json_str(json: &str) -> Result<Corpus> {
        let record: CorpusRecord = serde_json::from_str(json)?;
        record.into_corpus()
    }
}

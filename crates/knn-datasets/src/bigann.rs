//! Binarios de big-ann-benchmarks.
//!
//! Layout: cabecera `u32 n`, `u32 dim` (little-endian) seguida de `n * dim`
//! elementos. `fbin` = f32, `u8bin` = u8, `ibin` = i32 (ids de vecinos).
//! Las filas se leen bajo demanda; `reset` hace seek al byte 8.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use knn_core::{Dataset, DatasetError, DatasetRows};
use log::debug;

const HEADER_LEN: u64 = 8;

/// Tipo de elemento almacenado en el archivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    F32,
    U8,
    I32,
}

impl Element {
    pub fn width(self) -> usize {
        match self {
            Element::F32 | Element::I32 => 4,
            Element::U8 => 1,
        }
    }

    /// Elige el tipo de elemento por extensión (`fbin`, `u8bin`, `ibin`).
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("fbin") => Ok(Element::F32),
            Some("u8bin") => Ok(Element::U8),
            Some("ibin") => Ok(Element::I32),
            other => Err(DatasetError::Format(format!("unknown big-ann extension {:?} for {}", other, path.display()))),
        }
    }
}

#[derive(Debug)]
pub struct BigAnnDataset {
    reader: BufReader<File>,
    element: Element,
    rows: usize,
    dim: usize,
    cursor: usize,
}

impl BigAnnDataset {
    pub fn open(path: impl AsRef<Path>, element: Element) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut header = [0u8; HEADER_LEN as usize];
        reader.read_exact(&mut header)
              .map_err(|e| DatasetError::Format(format!("{}: cannot read header: {e}", path.display())))?;
        let rows = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let dim = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;

        let payload_len = |width: u64| {
            (rows as u64).checked_mul(dim as u64)
                         .and_then(|n| n.checked_mul(width))
                         .and_then(|n| n.checked_add(HEADER_LEN))
                         .ok_or_else(|| DatasetError::Format(format!("{}: header {rows}x{dim} overflows the file size", path.display())))
        };
        let expected = payload_len(element.width() as u64)?;
        // Los ground truth publicados (`*.ibin`) añaden las distancias f32 tras los ids.
        let with_distances = payload_len(8)?;
        if file_len != expected && !(element == Element::I32 && file_len == with_distances) {
            return Err(DatasetError::Format(format!("{}: header claims {rows}x{dim} ({expected} bytes) but file has {file_len} bytes",
                                                    path.display())));
        }
        debug!("bigann: opened {} rows={rows} dim={dim} element={element:?}", path.display());
        Ok(Self { reader,
                  element,
                  rows,
                  dim,
                  cursor: 0 })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn read_row(&mut self, buf: &mut [u8]) -> Result<(), DatasetError> {
        self.reader.read_exact(buf)?;
        Ok(())
    }
}

impl Dataset for BigAnnDataset {
    fn read(&mut self, count: usize) -> Result<Option<DatasetRows>, DatasetError> {
        if self.cursor >= self.rows {
            return Ok(None);
        }
        let end = (self.cursor + count).min(self.rows);
        let n = end - self.cursor;
        let mut buf = vec![0u8; self.dim * self.element.width()];

        let out = match self.element {
            Element::F32 => {
                let mut rows = Vec::with_capacity(n);
                for _ in 0..n {
                    self.read_row(&mut buf)?;
                    rows.push(buf.chunks_exact(4).map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect());
                }
                DatasetRows::Vectors(rows)
            }
            Element::U8 => {
                let mut rows = Vec::with_capacity(n);
                for _ in 0..n {
                    self.read_row(&mut buf)?;
                    rows.push(buf.iter().map(|b| f32::from(*b)).collect());
                }
                DatasetRows::Vectors(rows)
            }
            Element::I32 => {
                let mut rows = Vec::with_capacity(n);
                for _ in 0..n {
                    self.read_row(&mut buf)?;
                    rows.push(buf.chunks_exact(4).map(|c| i64::from(i32::from_le_bytes([c[0], c[1], c[2], c[3]]))).collect());
                }
                DatasetRows::Ids(rows)
            }
        };
        self.cursor = end;
        Ok(Some(out))
    }

    fn reset(&mut self) -> Result<(), DatasetError> {
        self.reader.seek(SeekFrom::Start(HEADER_LEN))?;
        self.cursor = 0;
        Ok(())
    }

    fn size(&self) -> usize {
        self.rows
    }
}

use knn_core::{Dataset, DatasetError, DatasetRows};

/// Dataset respaldado por filas en memoria.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    rows: DatasetRows,
    cursor: usize,
}

impl InMemoryDataset {
    pub fn new(rows: DatasetRows) -> Self {
        Self { rows, cursor: 0 }
    }

    pub fn vectors(rows: Vec<Vec<f32>>) -> Self {
        Self::new(DatasetRows::Vectors(rows))
    }

    pub fn ids(rows: Vec<Vec<i64>>) -> Self {
        Self::new(DatasetRows::Ids(rows))
    }

    /// Posición actual del cursor.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl Dataset for InMemoryDataset {
    fn read(&mut self, count: usize) -> Result<Option<DatasetRows>, DatasetError> {
        if self.cursor >= self.size() {
            return Ok(None);
        }
        let end = (self.cursor + count).min(self.size());
        let range = self.cursor..end;
        self.cursor = end;
        Ok(Some(match &self.rows {
            DatasetRows::Vectors(v) => DatasetRows::Vectors(v[range].to_vec()),
            DatasetRows::Ids(v) => DatasetRows::Ids(v[range].to_vec()),
        }))
    }

    fn reset(&mut self) -> Result<(), DatasetError> {
        self.cursor = 0;
        Ok(())
    }

    fn size(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_clamps_to_end_then_signals_exhaustion() {
        let mut ds = InMemoryDataset::ids(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(ds.read(2).unwrap(), Some(DatasetRows::Ids(vec![vec![1], vec![2]])));
        assert_eq!(ds.read(2).unwrap(), Some(DatasetRows::Ids(vec![vec![3]])));
        assert_eq!(ds.read(2).unwrap(), None);
        assert_eq!(ds.read(1).unwrap(), None);
        assert_eq!(ds.size(), 3);
    }

    #[test]
    fn reset_rewinds_to_first_row() {
        let mut ds = InMemoryDataset::vectors(vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
        ds.read(5).unwrap();
        assert_eq!(ds.position(), 2);
        ds.reset().unwrap();
        assert_eq!(ds.read(1).unwrap(), Some(DatasetRows::Vectors(vec![vec![0.1, 0.2]])));
    }
}

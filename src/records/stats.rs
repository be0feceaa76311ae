use std::collections::BTreeMap;

use super::CsvRow;
use crate::core::DocumentType;

/// Counters of a run, written as the single row of `estadisticas`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Documents seen: XML files plus XML members of ZIP archives.
    pub total_files: usize,
    /// Documents extracted without error.
    pub processed: usize,
    /// Documents (or archives) that failed to read, decode or extract.
    pub errors: usize,
    /// Documents whose type could not be determined.
    pub unknown: usize,
    /// Successfully extracted documents per type.
    pub by_type: BTreeMap<DocumentType, usize>,
}

impl RunStats {
    pub fn record_processed(&mut self, doc_type: DocumentType) {
        self.processed += 1;
        *self.by_type.entry(doc_type).or_default() += 1;
    }

    pub fn count(&self, doc_type: DocumentType) -> usize {
        self.by_type.get(&doc_type).copied().unwrap_or(0)
    }
}

impl CsvRow for RunStats {
    const HEADER: &'static [&'static str] = &[
        "total_archivos",
        "archivos_procesados",
        "errores",
        "desconocidos",
        "total_factura",
        "total_boleta_venta",
        "total_nota_credito",
        "total_nota_debito",
        "total_guia_remision",
    ];

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.total_files.to_string(),
            self.processed.to_string(),
            self.errors.to_string(),
            self.unknown.to_string(),
        ];
        fields.extend(DocumentType::ALL.iter().map(|t| self.count(*t).to_string()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_type_columns_follow_catalog_order() {
        let mut stats = RunStats {
            total_files: 5,
            errors: 1,
            unknown: 1,
            ..Default::default()
        };
        stats.record_processed(DocumentType::Waybill);
        stats.record_processed(DocumentType::Invoice);
        stats.record_processed(DocumentType::Invoice);

        assert_eq!(stats.count(DocumentType::Invoice), 2);
        assert_eq!(
            stats.fields(),
            vec!["5", "3", "1", "1", "2", "0", "0", "0", "1"]
        );
        assert_eq!(stats.fields().len(), RunStats::HEADER.len());
    }
}

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::info;

use crate::core::{ConvertError, DocumentType};
use crate::records::{CsvRow, RunStats, Tables};

/// Stem of the line detail report.
pub const LINES_STEM: &str = "lineas";
/// Stem of the payment terms report.
pub const PAYMENTS_STEM: &str = "pagos";
/// Stem of the statistics report.
pub const STATS_STEM: &str = "estadisticas";

/// Writes the report tables of one run into a directory.
#[derive(Debug)]
pub struct ReportWriter<'a> {
    dir: &'a Path,
    stamp: &'a str,
    delimiter: u8,
}

impl<'a> ReportWriter<'a> {
    pub fn new(dir: &'a Path, stamp: &'a str, delimiter: u8) -> Self {
        Self {
            dir,
            stamp,
            delimiter,
        }
    }

    /// Path of the report with the given stem.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}_{}.csv", self.stamp))
    }

    /// Write one table. An empty table still gets its header line.
    pub fn write_table<R: CsvRow>(&self, stem: &str, rows: &[R]) -> Result<PathBuf, ConvertError> {
        let path = self.path_for(stem);
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&path)?;
        wtr.write_record(R::HEADER)?;
        for row in rows {
            wtr.write_record(row.fields())?;
        }
        wtr.flush()?;
        info!(path = %path.display(), rows = rows.len(), "report written");
        Ok(path)
    }

    /// Write every table of a run, in a fixed order.
    pub fn write_all(
        &self,
        tables: &Tables,
        stats: &RunStats,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        Ok(vec![
            self.write_table(DocumentType::Invoice.report_stem(), &tables.invoices)?,
            self.write_table(
                DocumentType::SalesReceipt.report_stem(),
                &tables.sales_receipts,
            )?,
            self.write_table(DocumentType::CreditNote.report_stem(), &tables.credit_notes)?,
            self.write_table(DocumentType::DebitNote.report_stem(), &tables.debit_notes)?,
            self.write_table(DocumentType::Waybill.report_stem(), &tables.waybills)?,
            self.write_table(LINES_STEM, &tables.lines)?,
            self.write_table(PAYMENTS_STEM, &tables.payments)?,
            self.write_table(STATS_STEM, std::slice::from_ref(stats))?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InvoiceRow, PaymentRow};

    #[test]
    fn empty_table_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), "20240315_101500", b',');
        let path = writer.write_table::<PaymentRow>(PAYMENTS_STEM, &[]).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "pagos_20240315_101500.csv"
        );
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "cui,numero,forma_pago_id,forma_pago,monto_pago,moneda_pago,fecha_vencimiento\n"
        );
    }

    #[test]
    fn delimiter_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), "t", b';');
        let row = InvoiceRow {
            cui: None,
            type_code: "01".into(),
            number: "F001-1".into(),
            issue_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            due_date: None,
            currency: Some("PEN".into()),
            issuer_ruc: "20123456789".into(),
            issuer_name: Some("ACME; S.A.C.".into()),
            customer_ruc: None,
            customer_name: None,
            sale_value: None,
            igv: None,
            isc: None,
            icbper: None,
            other_taxes: None,
            total: None,
            source: "f.xml".into(),
        };
        let path = writer.write_table("facturas", &[row]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let data = content.lines().nth(1).unwrap();
        assert_eq!(
            data,
            ";01;F001-1;2024-03-15;;PEN;20123456789;\"ACME; S.A.C.\";;;;;;;;;f.xml"
        );
    }

    #[test]
    fn write_all_produces_every_report() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), "t", b',');
        let paths = writer
            .write_all(&Tables::default(), &RunStats::default())
            .unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "facturas_t.csv",
                "boletas_t.csv",
                "notas_credito_t.csv",
                "notas_debito_t.csv",
                "guias_remision_t.csv",
                "lineas_t.csv",
                "pagos_t.csv",
                "estadisticas_t.csv",
            ]
        );
        let stats = std::fs::read_to_string(&paths[7]).unwrap();
        assert_eq!(stats.lines().nth(1), Some("0,0,0,0,0,0,0,0,0"));
    }
}

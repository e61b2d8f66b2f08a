//! Export builders: CSV for spreadsheets, pretty JSON for backups.

use crate::{
    EngineError, ResultEngine,
    transactions::{Transaction, TransactionKind},
    users::UserData,
};

/// UTF-8 byte-order mark, so spreadsheet apps pick the right encoding.
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Renders the transaction list as semicolon-delimited CSV with a BOM.
///
/// Layout: a `ТРАНЗАКЦИИ` banner row, then
/// `ID;Дата;Тип;Категория;Сумма (₽);Описание` with the type rendered
/// as Доход/Расход and the stored (signed) amount.
pub fn transactions_csv(transactions: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(BOM.to_vec());

    writer.write_record(["ТРАНЗАКЦИИ"])?;
    writer.write_record(["ID", "Дата", "Тип", "Категория", "Сумма (₽)", "Описание"])?;

    for t in transactions {
        let kind = match t.kind {
            TransactionKind::Income => "Доход",
            TransactionKind::Expense => "Расход",
        };
        writer.write_record([
            t.id.to_string(),
            t.date.clone(),
            kind.to_string(),
            t.category.clone(),
            t.amount.to_string(),
            t.description.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.into_error().into()))
}

/// Renders a per-user snapshot as pretty-printed JSON.
///
/// Feeding the output back through [`serde_json`] yields the same
/// transaction/investment/goal lists, so it doubles as a backup format.
pub fn user_data_json(data: &UserData) -> ResultEngine<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u32, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: "2024-03-10".to_string(),
            kind,
            amount,
            description: "описание; с точкой с запятой".to_string(),
            category: "Еда".to_string(),
        }
    }

    #[test]
    fn csv_starts_with_bom_and_banner() {
        let bytes = transactions_csv(&[]).expect("csv");
        assert_eq!(&bytes[..3], &BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ТРАНЗАКЦИИ"));
        assert_eq!(lines.next(), Some("ID;Дата;Тип;Категория;Сумма (₽);Описание"));
    }

    #[test]
    fn csv_rows_render_kind_and_quote_delimiters() {
        let bytes = transactions_csv(&[
            tx(1, 5000.0, TransactionKind::Income),
            tx(2, -40.0, TransactionKind::Expense),
        ])
        .expect("csv");
        let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8");
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert!(rows[0].starts_with("1;2024-03-10;Доход;Еда;5000;"));
        assert!(rows[1].starts_with("2;2024-03-10;Расход;Еда;-40;"));
        // The semicolon inside the description must be quoted.
        assert!(rows[0].ends_with("\"описание; с точкой с запятой\""));
    }
}

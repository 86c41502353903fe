use crate::domain::account::Account;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 6] = [
    "id",
    "due_date",
    "payment_date",
    "amount",
    "description",
    "status",
];

/// Writes accounts as CSV rows, header first.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts<'a, I>(&mut self, accounts: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        self.writer.write_record(HEADER)?;
        for account in accounts {
            self.writer.write_record([
                account.id.to_string(),
                account.due_date.to_string(),
                account
                    .payment_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                account.amount.to_string(),
                account.description.clone(),
                account.status.clone(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

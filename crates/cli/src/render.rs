//! Plain-text rendering of the user list.

use std::fmt::Write as _;

use user_registry::UserRow;
use user_registry::list::EMPTY_MESSAGE;

const HEADERS: [&str; 5] = ["ID", "Created", "Name", "Email", "Phone"];

/// Render rows as an aligned text table, or the empty-list message.
pub fn table(rows: &[UserRow]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.created_at.clone(),
                row.name.clone(),
                row.email.clone(),
                row.phone.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_owned), &widths);
    push_line(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use user_registry_core::{User, UserFields, UserId};

    use super::*;

    #[test]
    fn test_empty_table() {
        assert_eq!(table(&[]), "No users registered yet.\n");
    }

    #[test]
    fn test_aligned_columns() {
        let created_at = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let user = User::new(
            UserId::new(1),
            UserFields::parse("Ada", "ada@example.com", "1234567890").unwrap(),
            created_at,
        );

        let rendered = table(&[UserRow::from(&user)]);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ID | Created             | Name | Email           | Phone"
        );
        assert_eq!(
            lines[2],
            "1  | 02/01/2024 03:04:05 | Ada  | ada@example.com | 1234567890"
        );
    }
}

//! Plain-text rendering. Pure string builders: state in, text out, the
//! caller prints.

use chrono::NaiveDate;

use courtbook_core::{
    display_time, Application, BookingWindow, Court, CreditSummary, GridCell, ReservationRecord,
    Selection, SlotGrid, NOT_RESERVABLE_LABEL,
};

use crate::actions::ApplyPrompt;

fn push_table_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            out.push_str(" | ");
        }
        out.push_str(&format!("{:<width$}", cell, width = widths[index]));
    }
    out.push('\n');
}

/// The slot grid as an aligned text table. Bookable cells carry a `*`.
pub fn grid_table(grid: &SlotGrid) -> String {
    if grid.rows.is_empty() {
        return "No slots published for this date.\n".to_string();
    }

    let mut headers = vec!["Time".to_string()];
    headers.extend(grid.columns.iter().map(|column| column.name.clone()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in &grid.rows {
        let mut cells = vec![row.time_range.clone()];
        for cell in &row.cells {
            cells.push(match cell {
                GridCell::NotReservable => NOT_RESERVABLE_LABEL.to_string(),
                GridCell::Slot(slot) => {
                    let mut text = format!("#{} {}", slot.slot_id, slot.label);
                    if let Some(count) = slot.applications_count.filter(|count| *count > 0) {
                        text.push_str(&format!(" ({count} applied)"));
                    }
                    if slot.clickable {
                        text.push_str(" *");
                    }
                    text
                }
            });
        }
        rows.push(cells);
    }

    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for cells in &rows {
        for (index, cell) in cells.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let mut out = String::new();
    push_table_row(&mut out, &headers, &widths);
    let line_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    out.push_str(&"-".repeat(line_width));
    out.push('\n');
    for cells in &rows {
        push_table_row(&mut out, cells, &widths);
    }
    out.push_str("* bookable, apply with: apply <slot>\n");
    out
}

pub fn courts_list(courts: &[Court]) -> String {
    if courts.is_empty() {
        return "No courts available.\n".to_string();
    }
    let mut out = String::new();
    for court in courts {
        out.push_str(&format!(
            "#{} {}  {} (capacity {})",
            court.id, court.name, court.location, court.capacity
        ));
        if let Some(kind) = &court.court_type {
            out.push_str(&format!("  [{kind}]"));
        }
        if !court.is_active {
            out.push_str("  [inactive]");
        }
        out.push('\n');
        if let Some(description) = &court.description {
            out.push_str(&format!("    {description}\n"));
        }
    }
    out
}

pub fn applications_list(applications: &[Application]) -> String {
    if applications.is_empty() {
        return "No applications yet.\n".to_string();
    }
    let mut out = String::new();
    for application in applications {
        out.push_str(&format!(
            "#{} {}  {} {} - {}  [{}]\n",
            application.id,
            application.court_name.as_deref().unwrap_or("(unknown court)"),
            application.date,
            display_time(&application.start_time),
            display_time(&application.end_time),
            application.status.label()
        ));
        out.push_str(&format!("    applied {}", application.applied_at));
        if let Some(position) = application.queue_position {
            out.push_str(&format!("  queue #{position}"));
        }
        if let Some(weight) = application.priority_weight {
            out.push_str(&format!("  weight {weight:.2}"));
        }
        out.push('\n');
        if application.status.is_cancellable() {
            out.push_str(&format!("    cancel with: cancel {}\n", application.id));
        }
    }
    out
}

pub fn records_list(records: &[ReservationRecord], stats: Option<&CreditSummary>) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No reservation records.\n");
    }
    for record in records {
        out.push_str(&format!(
            "#{} {}  {} {} - {}  [{}]\n",
            record.id,
            record.court_name.as_deref().unwrap_or("(unknown court)"),
            record.date,
            display_time(&record.start_time),
            display_time(&record.end_time),
            record.status.label()
        ));
        if let Some(cancelled_at) = record.cancelled_at {
            out.push_str(&format!("    cancelled {cancelled_at}\n"));
        }
        if let Some(completed_at) = record.completed_at {
            out.push_str(&format!("    completed {completed_at}\n"));
        }
    }
    if let Some(stats) = stats {
        out.push('\n');
        out.push_str(&credit_panel(stats));
    }
    out
}

pub fn credit_panel(summary: &CreditSummary) -> String {
    let mut out = format!("Credit score: {}\n", summary.credit_score);
    if let Some(total) = summary.total_applications {
        let successful = summary.successful_applications.unwrap_or(0);
        out.push_str(&format!(
            "Applications: {total} total, {successful} successful\n"
        ));
    }
    if let Some(no_shows) = summary.no_show_count {
        out.push_str(&format!("No-shows: {no_shows}\n"));
    }
    if let Some(rate) = summary.success_rate {
        out.push_str(&format!("Success rate: {rate:.1}%\n"));
    }
    if let Some(weight) = summary.priority_weight {
        out.push_str(&format!("Priority weight: {weight:.2}\n"));
    }
    out
}

pub fn selection_summary(selection: &Selection) -> String {
    if selection.is_empty() {
        return "Nothing selected.\n".to_string();
    }
    let mut out = format!(
        "Selected {} slot(s), total {:.2}\n",
        selection.len(),
        selection.total()
    );
    for (court_id, entries) in selection.by_court() {
        let court_name = entries
            .first()
            .map(|entry| entry.court_name.as_str())
            .unwrap_or("Court");
        out.push_str(&format!("  {court_name} (#{court_id})\n"));
        for entry in entries {
            out.push_str(&format!("    {}  {:.2}\n", entry.time_range, entry.price));
        }
    }
    out
}

/// The selectable dates, the current one in brackets.
pub fn date_strip(window: BookingWindow, selected: NaiveDate) -> String {
    let mut out = String::from("Dates:");
    for date in window.dates() {
        if date == selected {
            out.push_str(&format!(" [{date}]"));
        } else {
            out.push_str(&format!(" {date}"));
        }
    }
    out.push('\n');
    out
}

pub fn apply_prompt_text(prompt: &ApplyPrompt) -> String {
    if prompt.price > 0.0 {
        format!(
            "Apply for {} on {} at {}, price {:.2}? [y/N] ",
            prompt.court_name, prompt.date, prompt.time_range, prompt.price
        )
    } else {
        format!(
            "Apply for {} on {} at {}? [y/N] ",
            prompt.court_name, prompt.date, prompt.time_range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use courtbook_core::{
        build_grid, ApplicationStatus, SelectedSlot, SlotStatus, TimeSlot,
    };

    fn court(id: i64, name: &str) -> Court {
        Court {
            id,
            name: name.to_string(),
            location: "North hall".to_string(),
            capacity: 2,
            court_type: None,
            description: None,
            is_active: true,
        }
    }

    fn slot(id: i64, court_id: i64, start: &str, end: &str, status: &str) -> TimeSlot {
        TimeSlot {
            id,
            court_id,
            court_name: None,
            court_location: None,
            date: "2026-08-23".parse().unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            status: SlotStatus::from_wire(status.to_string()),
            applications_count: None,
            price: 30.0,
        }
    }

    fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn grid_table_lays_out_rows_and_marks_bookable_cells() {
        let courts = vec![court(1, "Court A"), court(2, "Court B")];
        let slots = vec![
            slot(12, 1, "08:00", "09:00", "available"),
            slot(13, 1, "10:00", "11:00", "reserved"),
        ];
        let table = grid_table(&build_grid(&slots, &courts));

        assert!(table.contains("Court A"));
        assert!(table.contains("#12 Available *"));
        assert!(table.contains("#13 Reserved"));
        assert!(table.contains(NOT_RESERVABLE_LABEL));
        let early = table.find("08:00 - 09:00").unwrap();
        let late = table.find("10:00 - 11:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn grid_table_shows_applicant_counts_when_present() {
        let courts = vec![court(1, "Court A"), court(2, "Court B")];
        let mut contested = slot(12, 1, "08:00", "09:00", "has_applications");
        contested.applications_count = Some(3);
        let mut open = slot(13, 2, "08:00", "09:00", "available");
        open.applications_count = Some(0);
        let table = grid_table(&build_grid(&[contested, open], &courts));

        assert!(table.contains("#12 Has applicants (3 applied)"));
        assert!(table.contains("#13 Available *"));
        assert!(!table.contains("0 applied"));
    }

    #[test]
    fn empty_grid_renders_a_short_message() {
        let table = grid_table(&build_grid(&[], &[court(1, "Court A")]));
        assert_eq!(table, "No slots published for this date.\n");
    }

    #[test]
    fn only_pending_applications_get_a_cancel_hint() {
        let mut pending = Application {
            id: 5,
            timeslot_id: 12,
            status: ApplicationStatus::Pending,
            court_id: Some(1),
            court_name: Some("Court A".to_string()),
            court_location: None,
            date: "2026-08-23".parse().unwrap(),
            start_time: "08:00".to_string(),
            end_time: "09:00".to_string(),
            applied_at: timestamp("2026-08-22T10:00:00"),
            processed_at: None,
            priority_weight: None,
            queue_position: Some(2),
        };
        let text = applications_list(std::slice::from_ref(&pending));
        assert!(text.contains("cancel with: cancel 5"));
        assert!(text.contains("queue #2"));

        pending.status = ApplicationStatus::Approved;
        let text = applications_list(std::slice::from_ref(&pending));
        assert!(!text.contains("cancel with"));
        assert!(text.contains("[Approved]"));
    }

    #[test]
    fn selection_summary_groups_by_court() {
        let mut selection = Selection::default();
        selection.toggle(SelectedSlot {
            time_range: "08:00 - 09:00".to_string(),
            court_id: 1,
            court_name: "Court A".to_string(),
            price: 30.0,
        });
        selection.toggle(SelectedSlot {
            time_range: "10:00 - 11:00".to_string(),
            court_id: 1,
            court_name: "Court A".to_string(),
            price: 45.0,
        });

        let text = selection_summary(&selection);
        assert!(text.contains("Selected 2 slot(s), total 75.00"));
        assert!(text.contains("Court A (#1)"));
        assert!(text.contains("    08:00 - 09:00  30.00"));
    }

    #[test]
    fn date_strip_marks_the_selected_date() {
        let window = BookingWindow::around("2026-08-22".parse().unwrap());
        let text = date_strip(window, "2026-08-24".parse().unwrap());
        assert!(text.contains("[2026-08-24]"));
        assert!(text.contains(" 2026-08-23 "));
    }

    #[test]
    fn credit_panel_skips_absent_counters() {
        let text = credit_panel(&CreditSummary {
            credit_score: 95,
            total_applications: None,
            successful_applications: None,
            no_show_count: None,
            success_rate: None,
            priority_weight: None,
        });
        assert_eq!(text, "Credit score: 95\n");
    }
}

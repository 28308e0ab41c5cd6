//! Plain-text views for the terminal.

use std::fmt::Write;

use jiff::civil::Date;
use plantao_core::model::{MonthlyReport, PaymentStatus, ShiftKind, WorkStatus};
use plantao_core::money::format_currency;
use plantao_core::payment_date::display_date;
use plantao_core::{CalendarEntry, CalendarMonth, GoalProgress, ShiftTally, WeekView};

fn kind_label(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Fixed => "fixo",
        ShiftKind::Sporadic => "avulso",
    }
}

fn work_label(status: WorkStatus) -> &'static str {
    match status {
        WorkStatus::Pending => "a realizar",
        WorkStatus::Completed => "realizado",
        WorkStatus::Missed => "faltou",
    }
}

fn weekday_abbrev(date: Date) -> &'static str {
    match date.weekday() {
        jiff::civil::Weekday::Sunday => "dom",
        jiff::civil::Weekday::Monday => "seg",
        jiff::civil::Weekday::Tuesday => "ter",
        jiff::civil::Weekday::Wednesday => "qua",
        jiff::civil::Weekday::Thursday => "qui",
        jiff::civil::Weekday::Friday => "sex",
        jiff::civil::Weekday::Saturday => "sáb",
    }
}

pub fn monthly_report(report: &MonthlyReport, today: Date) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recebimentos de {}", report.month);
    let _ = writeln!(out, "  Previsto:  {}", format_currency(report.predicted_total));
    let _ = writeln!(out, "  Recebido:  {}", format_currency(report.received_total));
    let _ = writeln!(out, "  Pendente:  {}", format_currency(report.pending_total));
    let _ = writeln!(
        out,
        "  Impostos:  {} previstos, {} pagos",
        format_currency(report.taxes_predicted),
        format_currency(report.taxes_paid)
    );
    if report.estimate_contribution > 0.0 {
        let _ = writeln!(
            out,
            "  Estimativa de avulsos: {}",
            format_currency(report.estimate_contribution)
        );
    }

    if report.shifts.is_empty() {
        let _ = writeln!(out, "\nNenhum plantão com pagamento neste mês.");
        return out;
    }

    let _ = writeln!(out, "\nPlantões ({}):", report.shift_count());
    for shift in &report.shifts {
        let status = match (shift.payment_status, shift.overdue_days(today)) {
            (PaymentStatus::Received, _) => "recebido".to_string(),
            (PaymentStatus::Pending, Some(days)) => format!("atrasado {days} dia(s)"),
            (PaymentStatus::Pending, None) => "pendente".to_string(),
        };
        let _ = writeln!(
            out,
            "  {}  {:<24} {:>14}  pgto {} ({})  {}",
            display_date(shift.date),
            shift.hospital,
            format_currency(shift.net),
            display_date(shift.payment.date),
            shift.payment.label,
            status
        );
        let _ = writeln!(out, "      id: {}", shift.id);
    }

    if !report.confirmed_payments.is_empty() {
        let _ = writeln!(out, "\nPagamentos confirmados:");
        for payment in &report.confirmed_payments {
            let _ = writeln!(
                out,
                "  {}  {:<24} {:>14}",
                display_date(payment.date),
                payment.hospital,
                format_currency(payment.amount)
            );
        }
    }
    out
}

pub fn goal_progress(progress: &GoalProgress) -> String {
    let tracking = match progress {
        GoalProgress::NoGoal => return "Nenhuma meta mensal definida.\n".to_string(),
        GoalProgress::Tracking(tracking) => tracking,
    };

    let mut out = String::new();
    let _ = writeln!(out, "Meta mensal: {}", format_currency(tracking.goal));
    let _ = writeln!(
        out,
        "  Recebido:  {} ({:.0}%)",
        format_currency(tracking.received),
        tracking.percentage
    );
    if tracking.reached {
        let _ = writeln!(out, "  Meta atingida!");
        return out;
    }
    let _ = writeln!(out, "  Faltam:    {}", format_currency(tracking.missing));
    if tracking.shifts_needed > 0 {
        let _ = writeln!(
            out,
            "  Cerca de {} plantão(ões) de {}",
            tracking.shifts_needed,
            format_currency(tracking.average_shift_value)
        );
    }
    out
}

fn entry_line(out: &mut String, entry: &CalendarEntry) {
    let _ = writeln!(
        out,
        "  {} {}  {}-{}  {:<24} [{}] {}",
        weekday_abbrev(entry.date),
        display_date(entry.date),
        entry.start_time,
        entry.end_time,
        entry.hospital,
        kind_label(entry.kind),
        work_label(entry.work_status)
    );
    let _ = writeln!(out, "      id: {}", entry.id);
}

pub fn week_view(week: &WeekView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Semana de {} a {}",
        display_date(week.start),
        display_date(week.end)
    );
    if week.entries.is_empty() {
        let _ = writeln!(out, "  Nenhum plantão.");
    }
    for entry in &week.entries {
        entry_line(&mut out, entry);
    }
    out
}

fn tally_line(out: &mut String, label: &str, tally: &ShiftTally) {
    let _ = writeln!(
        out,
        "  {label}: {} plantões ({} fixos, {} avulsos), {} h",
        tally.total, tally.fixed, tally.sporadic, tally.hours
    );
}

pub fn calendar_month(month: &CalendarMonth) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Calendário de {}", month.month);
    tally_line(&mut out, "Previstos", &month.stats.planned);
    tally_line(&mut out, "Realizados", &month.stats.completed);
    let _ = writeln!(out);
    for entry in &month.entries {
        entry_line(&mut out, entry);
    }
    out
}

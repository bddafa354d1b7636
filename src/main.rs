use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use reqwest::blocking::Client;
use seoul_rtms::{aggregate, convert, export, fetch, filter, geocode};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Query and summarize Seoul real-estate transaction records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seoul open-data API key
    #[arg(long)]
    api_key: String,
    /// District name, e.g. 강서구 (substring match)
    #[arg(long)]
    district: String,
    /// Sub-district name, e.g. 화곡동 (optional, substring match)
    #[arg(long)]
    dong: Option<String>,
    /// First record index (1-based)
    #[arg(long, default_value_t = 1)]
    start: u32,
    /// Last record index (inclusive)
    #[arg(long, default_value_t = 1000)]
    end: u32,
    /// Keep only contracts on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Keep only contracts on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Write the converted table to this CSV file
    #[arg(long, value_name = "FILE")]
    csv_out: Option<PathBuf>,
    /// Resolve transaction addresses to coordinates (one request per second)
    #[arg(long)]
    geocode: bool,
    /// Number of top transactions to highlight
    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let district = cli.district.trim();
    if district.is_empty() {
        bail!("district must not be empty");
    }
    if cli.start < 1 || cli.start > cli.end {
        bail!("invalid record range: need 1 <= start <= end");
    }

    let client = Client::new();
    info!(district, start = cli.start, end = cli.end, "querying transaction records");
    let raw = match fetch::fetch_rows(&client, &cli.api_key, cli.start, cli.end) {
        Ok(rows) => rows,
        // A failed fetch ends the run with an empty result; no partial data.
        Err(err) => {
            error!(%err, "API request failed");
            return Ok(());
        }
    };
    info!("fetched {} rows", raw.len());

    let matched = filter::filter_rows(&raw, district, cli.dong.as_deref());
    if matched.is_empty() {
        println!("no transaction records matched the given filters");
        return Ok(());
    }

    let mut table = convert::to_transactions(&matched);
    if cli.from.is_some() || cli.to.is_some() {
        let from = cli.from.unwrap_or(NaiveDate::MIN);
        let to = cli.to.unwrap_or(NaiveDate::MAX);
        table = convert::filter_date_range(table, from, to);
    }
    if table.is_empty() {
        println!("no transaction records fall within the given date range");
        return Ok(());
    }

    if let Some(path) = &cli.csv_out {
        export::write_csv(path, &table)?;
        info!("wrote {} rows to {}", table.len(), path.display());
    }

    print_table(&table);
    print_summary(&table);
    print_monthly_trend(&table);
    print_top(&table, cli.top);

    if cli.geocode {
        print_locations(&table)?;
    }

    Ok(())
}

fn print_table(table: &[convert::Transaction]) {
    println!("\n거래 내역 ({} rows)", table.len());
    for t in table {
        println!(
            "  {}  {} {} {}  {}  {} 만원  {} ㎡",
            fmt_date(t.contract_date),
            t.district,
            t.sub_district,
            fmt_lot(&t.main_lot, &t.sub_lot),
            fmt_name(&t.building_name),
            fmt_num(t.amount, 0),
            fmt_num(t.area, 2),
        );
    }
}

fn print_summary(table: &[convert::Transaction]) {
    let summary = aggregate::summarize(table);
    println!("\n요약 지표");
    println!("  총 거래 건수: {}", summary.count);
    println!("  평균 거래가: {:.0} 만원", summary.mean_amount);
    println!("  평균 단가: {:.2} 만원/㎡", summary.mean_unit_price);
}

fn print_monthly_trend(table: &[convert::Transaction]) {
    let monthly = aggregate::monthly_mean_unit_price(table);
    if monthly.is_empty() {
        println!("\n계약일/단가 정보가 없어 월별 추이를 계산할 수 없습니다");
        return;
    }
    println!("\n월별 평균 단가 (만원/㎡)");
    for ((year, month), mean) in monthly {
        println!("  {year}-{month:02}  {mean:.2}");
    }
}

fn print_top(table: &[convert::Transaction], n: usize) {
    let top = aggregate::top_by_amount(table, n);
    if top.is_empty() {
        println!("\n거래금액 정보가 있는 거래가 없습니다");
        return;
    }
    println!("\n상위 거래 TOP {}", top.len());
    for (rank, t) in top.iter().enumerate() {
        println!(
            "  {}. {}  {} 만원  {} ㎡  {}",
            rank + 1,
            fmt_name(&t.building_name),
            fmt_num(t.amount, 0),
            fmt_num(t.area, 2),
            fmt_date(t.contract_date),
        );
    }
}

fn print_locations(table: &[convert::Transaction]) -> Result<()> {
    let mut geocoder = geocode::Geocoder::new()?;
    println!("\n거래 위치");
    let mut found = 0;
    for t in table {
        let Some(address) =
            geocode::build_address(&t.district, &t.sub_district, &t.main_lot, &t.sub_lot)
        else {
            continue;
        };
        if let Some(point) = geocoder.lookup(&address) {
            println!("  {address}: {:.6}, {:.6}", point.lat, point.lon);
            found += 1;
        }
    }
    if found == 0 {
        println!("  지도에 표시할 위치 데이터가 없습니다");
    }
    Ok(())
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn fmt_num(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.decimals$}"))
}

fn fmt_name(name: &str) -> &str {
    if name.is_empty() {
        "건물명 없음"
    } else {
        name
    }
}

fn fmt_lot(main_lot: &str, sub_lot: &str) -> String {
    if main_lot.is_empty() {
        "-".to_string()
    } else if geocode::is_no_sub_lot(sub_lot) {
        main_lot.to_string()
    } else {
        format!("{main_lot}-{sub_lot}")
    }
}

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use roostoo_tx::{CancelTarget, Config, OrderQuery, OrderRequest, RoostooClient, Side};

const USAGE: &str = "usage: roostoo-tx <command>

commands:
  time                          server time and local clock skew
  info                          exchange info
  ticker [PAIR]                 market ticker
  balance                       wallet balances (signed)
  pending                       pending order count (signed)
  place PAIR SIDE QTY [PRICE]   new order, LIMIT when PRICE is given (signed)
  query [ORDER_ID]              query orders (signed)
  cancel [ORDER_ID]             cancel one or all pending orders (signed)";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_or_default();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,roostoo_tx={}", config.app.log_level)));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let client = match command.as_str() {
        "time" | "info" | "ticker" => RoostooClient::public_from_config(&config.exchange)?,
        _ => RoostooClient::from_config(&config.exchange)
            .context("signed commands need ROOSTOO_API_KEY and ROOSTOO_SECRET_KEY")?,
    };

    tracing::info!("Using {}", client.base_url());

    match command.as_str() {
        "time" => {
            let server = client.server_time().await?;
            let skew = server.skew_ms(chrono::Utc::now())?;
            println!("server: {} ({} ms)", server.datetime()?, server.server_time);
            println!("local skew: {} ms", skew);
        }
        "info" => print_json(&client.exchange_info().await?)?,
        "ticker" => print_json(&client.ticker(args.get(1).map(String::as_str)).await?)?,
        "balance" => print_json(&client.balance().await?)?,
        "pending" => print_json(&client.pending_count().await?)?,
        "place" => {
            let (Some(pair), Some(side), Some(qty)) = (args.get(1), args.get(2), args.get(3)) else {
                bail!("{}", USAGE);
            };
            let side: Side = side.parse()?;
            let quantity: Decimal = qty.parse().context("QTY must be a decimal")?;

            let order = match args.get(4) {
                Some(p) => {
                    let price: Decimal = p.parse().context("PRICE must be a decimal")?;
                    OrderRequest::limit(pair, side, quantity, price)
                }
                None => OrderRequest::market(pair, side, quantity),
            };
            print_json(&client.place_order(&order).await?)?;
        }
        "query" => {
            let query = match args.get(1) {
                Some(id) => OrderQuery::Id(id.parse().context("ORDER_ID must be an integer")?),
                None => OrderQuery::All,
            };
            print_json(&client.query_order(&query).await?)?;
        }
        "cancel" => {
            let target = match args.get(1) {
                Some(id) => CancelTarget::Id(id.parse().context("ORDER_ID must be an integer")?),
                None => CancelTarget::All,
            };
            print_json(&client.cancel_order(&target).await?)?;
        }
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

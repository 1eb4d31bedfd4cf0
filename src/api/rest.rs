use super::MarketDataProvider;
use crate::config::AlpacaConfig;
use crate::error::{QuoteError, Result};
use crate::expiration::format_expiration;
use crate::models::{parse_occ_symbol, OptionChain, OptionContract};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};

static DEFAULT_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h
});

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONTRACTS_PAGE_LIMIT: u32 = 10_000;
const SNAPSHOTS_PAGE_LIMIT: u32 = 1_000;

// Define proper types for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractListing {
    pub symbol: String,
    pub expiration_date: String,
    #[serde(rename = "type", default)]
    pub contract_type: String,
    #[serde(default)]
    pub strike_price: String, // Note: API returns this as a string "5", not a number
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractListingResponse {
    #[serde(default)]
    pub option_contracts: Vec<ContractListing>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub t: Option<DateTime<Utc>>,
    pub c: f64,
    #[serde(default)]
    pub v: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestQuote {
    #[serde(alias = "bp", default)]
    pub bid: f64,
    #[serde(alias = "ap", default)]
    pub ask: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestTrade {
    #[serde(alias = "p")]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSnapshot {
    #[serde(rename = "latestQuote")]
    pub latest_quote: Option<LatestQuote>,
    #[serde(rename = "latestTrade")]
    pub latest_trade: Option<LatestTrade>,
    #[serde(rename = "dailyBar")]
    pub daily_bar: Option<Bar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSnapshotsResponse {
    #[serde(default)]
    pub snapshots: HashMap<String, OptionSnapshot>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSnapshot {
    #[serde(rename = "dailyBar")]
    pub daily_bar: Option<Bar>,
    #[serde(rename = "prevDailyBar")]
    pub prev_daily_bar: Option<Bar>,
}

/// Alpaca Markets REST client
pub struct RestClient {
    client: reqwest::Client,
    config: AlpacaConfig,
}

impl RestClient {
    pub fn new(config: AlpacaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.headers(DEFAULT_HEADERS.clone())
            .header("APCA-API-KEY-ID", &self.config.api_key)
            .header("APCA-API-SECRET-KEY", &self.config.api_secret)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let resp = self
            .auth(self.client.get(url))
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| QuoteError::UpstreamFetch(format!("Request to {} failed: {}", url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(QuoteError::UpstreamFetch(format!(
                "Request to {} failed with status {}: {}",
                url, status, error_text
            )));
        }

        let resp_text = resp
            .text()
            .await
            .map_err(|e| QuoteError::UpstreamFetch(format!("Failed to get response text: {}", e)))?;

        serde_json::from_str::<T>(&resp_text).map_err(|e| {
            QuoteError::UpstreamFetch(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    /// All option contract listings for an underlying, following pagination
    pub async fn get_option_contracts(&self, symbol: &str) -> Result<Vec<ContractListing>> {
        let url = format!("{}/v2/options/contracts", self.config.trading_url);
        let mut contracts = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("underlying_symbols", symbol.to_string()),
                ("limit", CONTRACTS_PAGE_LIMIT.to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("page_token", token));
            }

            let page: ContractListingResponse = self.get_json(&url, &query).await?;
            contracts.extend(page.option_contracts);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Got {} option contracts for {}", contracts.len(), symbol);
        Ok(contracts)
    }

    /// Option chain snapshots for one expiration, following pagination
    pub async fn get_option_chain_snapshots(
        &self,
        underlying_symbol: &str,
        expiration_date: NaiveDate,
    ) -> Result<HashMap<String, OptionSnapshot>> {
        let url = format!(
            "{}/v1beta1/options/snapshots/{}",
            self.config.data_url, underlying_symbol
        );
        let mut snapshots = HashMap::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("feed", self.config.feed.clone()),
                ("expiration_date", format_expiration(expiration_date)),
                ("limit", SNAPSHOTS_PAGE_LIMIT.to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("page_token", token));
            }

            let page: OptionSnapshotsResponse = self.get_json(&url, &query).await?;
            snapshots.extend(page.snapshots);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(snapshots)
    }

    /// Latest stock snapshot for a symbol
    pub async fn get_stock_snapshot(&self, symbol: &str) -> Result<StockSnapshot> {
        let url = format!("{}/v2/stocks/{}/snapshot", self.config.data_url, symbol);
        self.get_json(&url, &[]).await
    }
}

#[async_trait]
impl MarketDataProvider for RestClient {
    async fn expirations(&self, ticker: &str) -> Result<Vec<String>> {
        let contracts = self.get_option_contracts(ticker).await?;
        let dates: BTreeSet<String> = contracts.into_iter().map(|c| c.expiration_date).collect();

        if dates.is_empty() {
            return Err(QuoteError::UpstreamFetch(format!("no options listed for {}", ticker)));
        }

        info!("{} has {} published expirations", ticker, dates.len());
        Ok(dates.into_iter().collect())
    }

    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain> {
        info!("Getting option chain for {} expiring {}", ticker, expiration);
        let snapshots = self.get_option_chain_snapshots(ticker, expiration).await?;

        let mut chain = OptionChain::new(ticker.to_string(), expiration);
        for (symbol, snapshot) in snapshots {
            let occ = match parse_occ_symbol(&symbol) {
                Some(occ) => occ,
                None => {
                    warn!("Skipping snapshot with unparseable symbol {}", symbol);
                    continue;
                }
            };
            if occ.expiration != expiration {
                warn!("Skipping {}: expires {} not {}", symbol, occ.expiration, expiration);
                continue;
            }

            let (bid, ask) = snapshot
                .latest_quote
                .as_ref()
                .map(|q| (q.bid, q.ask))
                .unwrap_or((0.0, 0.0));

            let mut contract = OptionContract::new(symbol, occ.option_type, occ.strike, bid, ask);
            contract.last = snapshot.latest_trade.as_ref().map(|t| t.price);
            contract.volume = snapshot
                .daily_bar
                .as_ref()
                .and_then(|b| b.v)
                .map(|v| v as u64);
            chain.push(contract);
        }

        if chain.is_empty() {
            return Err(QuoteError::UpstreamFetch(format!(
                "empty option chain for {} expiring {}",
                ticker, expiration
            )));
        }

        // Snapshots arrive keyed by symbol; present each side by strike
        chain.calls.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        chain.puts.sort_by(|a, b| a.strike.total_cmp(&b.strike));

        info!(
            "Chain for {} {}: {} calls, {} puts",
            ticker,
            expiration,
            chain.calls.len(),
            chain.puts.len()
        );
        Ok(chain)
    }

    async fn last_close(&self, ticker: &str) -> Result<f64> {
        let snapshot = self.get_stock_snapshot(ticker).await?;
        snapshot
            .daily_bar
            .or(snapshot.prev_daily_bar)
            .map(|bar| bar.c)
            .ok_or_else(|| QuoteError::UpstreamFetch(format!("no daily close available for {}", ticker)))
    }
}

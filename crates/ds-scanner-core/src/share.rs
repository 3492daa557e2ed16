use ds_api_types::ReportSnapshot;

pub fn share_text(snapshot: &ReportSnapshot) -> String {
    format!(
        "Check out my Degen Report Card for {} ({})! Scanned with @retardedauditor #Solana #MemeCoin",
        snapshot.name, snapshot.symbol
    )
}

pub fn share_intent_url(intent_base: &str, snapshot: &ReportSnapshot) -> String {
    format!(
        "{}?text={}",
        intent_base,
        urlencoding::encode(&share_text(snapshot))
    )
}

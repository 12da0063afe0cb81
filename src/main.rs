use cccparts_scraper::{
    fetch_rendered_page, CompletionClient, ProductDetails, ProductReport, DESCRIPTION_PARAMS,
    NAME_PARAMS,
};
use eyre::Result;

const DEFAULT_URL: &str = "https://shop.cccparts.com/p/eaton-yoke-20624/hf20624/";

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let url = url::Url::parse(&url)?;

    let markup = fetch_rendered_page(url.as_str()).await?;
    let details = ProductDetails::parse(&markup, &url)?;

    let client = CompletionClient::from_env()?;
    let prompt = details.generation_prompt();
    let generated_description = client.complete(&prompt, DESCRIPTION_PARAMS).await?;
    let generated_name = client.complete(&prompt, NAME_PARAMS).await?;

    let report = ProductReport::assemble(details, generated_name, generated_description);
    println!("{}", report.to_json()?);
    Ok(())
}

use fantoccini::{Client, ClientBuilder};
use std::error::Error;
use tokio::time::{Duration, timeout};

/// Upper bound for loading one results page
const LOAD_TIMEOUT: Duration = Duration::from_secs(45);

/// Load `url` in a WebDriver-controlled browser and return the rendered HTML
/// together with the final URL after redirects.
pub async fn fetch_page(webdriver_url: &str, url: &str) -> Result<(String, String), Box<dyn Error>> {
    let client = connect_to_webdriver(webdriver_url)
        .await
        .ok_or("no WebDriver server reachable")?;

    let result = timeout(LOAD_TIMEOUT, load(&client, url)).await;

    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }

    match result {
        Ok(loaded) => loaded,
        Err(_) => Err(format!("timed out loading {}", url).into()),
    }
}

async fn load(client: &Client, url: &str) -> Result<(String, String), Box<dyn Error>> {
    ::log::debug!("Loading {}", url);
    client.goto(url).await?;
    let source = client.source().await?;
    let final_url = client.current_url().await?;
    ::log::debug!("Loaded {} ({} bytes)", final_url, source.len());
    Ok((source, final_url.to_string()))
}

/// Connects to the WebDriver instance, falling back to common local ports
async fn connect_to_webdriver(webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444",
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}

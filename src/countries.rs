//! Supported countries and their retailer domains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries with a known retailer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    #[default]
    In,
    Us,
    Uk,
    Ca,
    Au,
    De,
    Fr,
    Jp,
    Cn,
    Br,
    It,
    Es,
    Nl,
    Sg,
    Za,
    Mx,
    Ae,
    Se,
}

impl Country {
    /// Returns the two-letter code used in requests.
    pub fn code(&self) -> &'static str {
        match self {
            Country::In => "IN",
            Country::Us => "US",
            Country::Uk => "UK",
            Country::Ca => "CA",
            Country::Au => "AU",
            Country::De => "DE",
            Country::Fr => "FR",
            Country::Jp => "JP",
            Country::Cn => "CN",
            Country::Br => "BR",
            Country::It => "IT",
            Country::Es => "ES",
            Country::Nl => "NL",
            Country::Sg => "SG",
            Country::Za => "ZA",
            Country::Mx => "MX",
            Country::Ae => "AE",
            Country::Se => "SE",
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Country::In => "India",
            Country::Us => "United States",
            Country::Uk => "United Kingdom",
            Country::Ca => "Canada",
            Country::Au => "Australia",
            Country::De => "Germany",
            Country::Fr => "France",
            Country::Jp => "Japan",
            Country::Cn => "China",
            Country::Br => "Brazil",
            Country::It => "Italy",
            Country::Es => "Spain",
            Country::Nl => "Netherlands",
            Country::Sg => "Singapore",
            Country::Za => "South Africa",
            Country::Mx => "Mexico",
            Country::Ae => "United Arab Emirates",
            Country::Se => "Sweden",
        }
    }

    /// Returns retailer domains in preference order.
    pub fn retailers(&self) -> &'static [&'static str] {
        match self {
            Country::In => &[
                "amazon.in",
                "flipkart.com",
                "croma.com",
                "reliance-digital.in",
                "tatacliq.com",
                "snapdeal.com",
                "shopclues.com",
                "paytmmall.com",
                "jiomart.com",
                "bigbasket.com",
            ],
            Country::Us => &[
                "amazon.com",
                "bestbuy.com",
                "walmart.com",
                "target.com",
                "newegg.com",
                "ebay.com",
                "costco.com",
                "bhphotovideo.com",
                "adorama.com",
                "overstock.com",
            ],
            Country::Uk => &[
                "amazon.co.uk",
                "currys.co.uk",
                "argos.co.uk",
                "johnlewis.com",
                "very.co.uk",
                "ebay.co.uk",
                "ao.com",
                "tesco.com",
                "sainsburys.co.uk",
                "marksandspencer.com",
            ],
            Country::Ca => &[
                "amazon.ca",
                "bestbuy.ca",
                "walmart.ca",
                "thesource.ca",
                "canadacomputers.com",
                "ebay.ca",
                "costco.ca",
                "staples.ca",
                "londondrugs.com",
                "memoryexpress.com",
            ],
            Country::Au => &[
                "amazon.com.au",
                "jbhifi.com.au",
                "harveynorman.com.au",
                "officeworks.com.au",
                "kogan.com",
                "ebay.com.au",
                "thegoodguys.com.au",
                "catch.com.au",
                "dicksmith.com.au",
                "bigw.com.au",
            ],
            Country::De => &[
                "amazon.de",
                "mediamarkt.de",
                "saturn.de",
                "otto.de",
                "conrad.de",
                "alternate.de",
                "cyberport.de",
                "mindfactory.de",
                "lidl.de",
                "ebay.de",
            ],
            Country::Fr => &[
                "amazon.fr",
                "fnac.com",
                "darty.com",
                "cdiscount.com",
                "rueducommerce.fr",
                "boulanger.com",
                "ldlc.com",
                "carrefour.fr",
                "laredoute.fr",
                "ebay.fr",
            ],
            Country::Jp => &[
                "amazon.co.jp",
                "rakuten.co.jp",
                "yodobashi.com",
                "biccamera.com",
                "kakaku.com",
                "dmm.com",
                "sofmap.com",
                "mercari.com",
                "paypaymall.yahoo.co.jp",
                "zozo.jp",
            ],
            Country::Cn => &[
                "jd.com",
                "tmall.com",
                "taobao.com",
                "suning.com",
                "pinduoduo.com",
                "dangdang.com",
                "gome.com.cn",
                "vip.com",
                "xiaomi.com",
                "meituan.com",
            ],
            Country::Br => &[
                "amazon.com.br",
                "mercadolivre.com.br",
                "americanas.com.br",
                "submarino.com.br",
                "magazineluiza.com.br",
                "casasbahia.com.br",
                "extra.com.br",
                "pontofrio.com.br",
                "shopee.com.br",
                "carrefour.com.br",
            ],
            Country::It => &[
                "amazon.it",
                "eprice.it",
                "unieuro.it",
                "mediaworld.it",
                "ebay.it",
                "monclick.it",
                "trovaofferte.it",
                "euronics.it",
                "trony.it",
                "cooponline.it",
            ],
            Country::Es => &[
                "amazon.es",
                "elcorteingles.es",
                "mediamarkt.es",
                "pccomponentes.com",
                "fnac.es",
                "carrefour.es",
                "worten.es",
                "ebay.es",
                "phonehouse.es",
                "alcampo.es",
            ],
            Country::Nl => &[
                "amazon.nl",
                "bol.com",
                "coolblue.nl",
                "mediamarkt.nl",
                "wehkamp.nl",
                "albert-heijn.nl",
                "beslist.nl",
                "ebay.nl",
                "fonq.nl",
                "bcc.nl",
            ],
            Country::Sg => &[
                "amazon.sg",
                "lazada.sg",
                "shopee.sg",
                "qoo10.sg",
                "courts.com.sg",
                "harveynorman.com.sg",
                "chal.com.sg",
                "redmart.lazada.sg",
                "fairprice.com.sg",
                "ezbuy.sg",
            ],
            Country::Za => &[
                "takealot.com",
                "makro.co.za",
                "loot.co.za",
                "bidorbuy.co.za",
                "shoprite.co.za",
                "game.co.za",
                "incredible.co.za",
                "checkers.co.za",
                "wantitall.co.za",
                "evetech.co.za",
            ],
            Country::Mx => &[
                "amazon.com.mx",
                "mercadolibre.com.mx",
                "walmart.com.mx",
                "liverpool.com.mx",
                "coppel.com",
                "sanborns.com.mx",
                "elektra.com.mx",
                "sears.com.mx",
                "claroshop.com",
                "costco.com.mx",
            ],
            Country::Ae => &[
                "amazon.ae",
                "noon.com",
                "souq.com",
                "sharafdg.com",
                "carrefouruae.com",
                "jumbo.ae",
                "emaxme.com",
                "luluwebstore.com",
                "dubai.dubizzle.com",
                "erosdigitalhome.ae",
            ],
            Country::Se => &[
                "amazon.se",
                "elgiganten.se",
                "inet.se",
                "komplett.se",
                "webhallen.com",
                "cdon.se",
                "pricerunner.se",
                "netonnet.se",
                "mediamarkt.se",
                "clasohlson.com",
            ],
        }
    }

    /// Returns all supported countries.
    pub fn all() -> &'static [Country] {
        &[
            Country::In,
            Country::Us,
            Country::Uk,
            Country::Ca,
            Country::Au,
            Country::De,
            Country::Fr,
            Country::Jp,
            Country::Cn,
            Country::Br,
            Country::It,
            Country::Es,
            Country::Nl,
            Country::Sg,
            Country::Za,
            Country::Mx,
            Country::Ae,
            Country::Se,
        ]
    }
}

/// Returns the retailer list for a country code, falling back to the US list.
pub fn retailers_for(code: &str) -> &'static [&'static str] {
    code.parse::<Country>().unwrap_or(Country::Us).retailers()
}

/// Currency assigned to records for `code`.
///
/// Only India is distinguished; every other market is reported in USD.
pub fn currency_for(code: &str) -> &'static str {
    if code == "IN" {
        "INR"
    } else {
        "USD"
    }
}

/// Lowercase region code understood by the shopping-search provider.
pub fn provider_region(code: &str) -> String {
    code.to_lowercase()
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Country::all()
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("Unknown country: {}. Use `pricehunter countries` to list codes", s))
    }
}

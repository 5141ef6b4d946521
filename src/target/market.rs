use crate::TargetError;
use std::fmt;
use std::str::FromStr;

/// Marketplaces a product can be resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Market {
    /// amazon.com
    #[default]
    Global,
    /// amazon.com.mx
    Mexico,
    /// amazon.jp
    Japan,
}

impl Market {
    /// Every known market, in table order
    pub const ALL: [Market; 3] = [Market::Global, Market::Mexico, Market::Japan];

    /// Returns the storefront domain for this market
    pub fn domain(&self) -> &'static str {
        match self {
            Self::Global => "amazon.com",
            Self::Mexico => "amazon.com.mx",
            Self::Japan => "amazon.jp",
        }
    }

    /// Returns the selector name used on the command line and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Mexico => "mexico",
            Self::Japan => "japan",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = TargetError;

    /// Parses a market selector (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "mexico" => Ok(Self::Mexico),
            "japan" => Ok(Self::Japan),
            _ => Err(TargetError::UnknownMarket(s.to_string())),
        }
    }
}

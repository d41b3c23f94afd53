//! Wallet API endpoint paths, relative to the version prefix.

use url::form_urlencoded;

pub const SIGN_INFO: &str = "/wallet/pre-transaction/sign-info";
pub const GAS_PRICE: &str = "/wallet/pre-transaction/gas-price";
pub const GAS_LIMIT: &str = "/wallet/pre-transaction/gas-limit";
pub const NONCE: &str = "/wallet/pre-transaction/nonce";
pub const BROADCAST_TRANSACTION: &str = "/wallet/pre-transaction/broadcast-transaction";
pub const TOTAL_VALUE_BY_ADDRESS: &str = "/wallet/asset/total-value-by-address";

/// Append form-urlencoded query parameters to an endpoint.
///
/// Parameter order is preserved; the result is exactly what gets signed.
pub fn with_query(endpoint: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", endpoint, query)
}

pub const LOGIN: &str = "/api/auth/login/";
pub const REGISTER: &str = "/api/auth/register/";
pub const PROFILE: &str = "/api/auth/profile/";
pub const LOGOUT: &str = "/api/auth/logout/";
pub const WALLET_NONCE: &str = "/api/auth/wallet/nonce/";
pub const WALLET_VERIFY: &str = "/api/auth/wallet/verify/";

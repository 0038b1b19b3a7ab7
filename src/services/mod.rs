pub mod spa_auth;

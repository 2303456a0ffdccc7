#![allow(dead_code, unused_imports)]
pub mod mock_name_servers;
pub mod responses;

pub use mock_name_servers::MockNameServers;
pub use responses::*;

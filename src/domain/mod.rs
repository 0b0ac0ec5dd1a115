// 領域層：追蹤模型與 ports，不依賴任何 HTTP 型別

pub mod model;
pub mod ports;

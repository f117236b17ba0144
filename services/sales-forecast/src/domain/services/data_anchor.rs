//! 锚定日期推导

use chrono::NaiveDate;
use salescast_ports::{Observation, ObservationSource};
use tracing::debug;

use crate::error::AnchorError;

/// 从历史观测序列推导最后已知日期
pub struct DataAnchor;

impl DataAnchor {
    /// 按日期升序排序后取最大日期
    ///
    /// 重复日期和缺口保持原样，不做去重或插值
    pub fn derive(mut observations: Vec<Observation>) -> Result<NaiveDate, AnchorError> {
        observations.sort_by_key(|o| o.date);
        observations
            .last()
            .map(|o| o.date)
            .ok_or(AnchorError::Empty)
    }

    /// 从数据源读取观测值并推导锚定日期
    pub async fn derive_from(source: &dyn ObservationSource) -> Result<NaiveDate, AnchorError> {
        let observations = source.fetch().await?;
        debug!(
            location = source.location(),
            rows = observations.len(),
            "Observations fetched"
        );
        Self::derive(observations)
    }
}

// ==========================================
// 仓储绩效奖金系统 - 参考数据提供者
// ==========================================
// ActivityTierProvider: 按岗位提供档位表
// KpiWeightProvider: 按岗位提供有效 KPI 权重
// 红线: 提供者返回的数据在单次计算内视为不可变快照
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::activity::ActivityTier;
use crate::domain::kpi::KpiWeight;
use crate::importer::reference_loader::ReferenceTableLoader;
use std::path::Path;

// ==========================================
// Trait: ActivityTierProvider
// ==========================================
pub trait ActivityTierProvider: Send + Sync {
    /// 获取岗位的全部档位（所有作业）
    fn tiers_for_role(&self, role: &str) -> ApiResult<Vec<ActivityTier>>;
}

// ==========================================
// Trait: KpiWeightProvider
// ==========================================
pub trait KpiWeightProvider: Send + Sync {
    /// 获取岗位的有效 KPI 权重（active=true）
    fn weights_for_role(&self, role: &str) -> ApiResult<Vec<KpiWeight>>;
}

// ==========================================
// InMemoryReferenceStore - 内存参考数据
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceStore {
    tiers: Vec<ActivityTier>,
    weights: Vec<KpiWeight>,
}

impl InMemoryReferenceStore {
    pub fn new(tiers: Vec<ActivityTier>, weights: Vec<KpiWeight>) -> Self {
        Self { tiers, weights }
    }

    /// 从参考表文件加载（CSV / Excel）
    pub fn from_files(
        loader: &ReferenceTableLoader,
        tiers_path: &Path,
        weights_path: &Path,
    ) -> ApiResult<Self> {
        let tiers = loader.load_activity_tiers(tiers_path)?;
        let weights = loader.load_kpi_weights(weights_path)?;
        Ok(Self::new(tiers, weights))
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }
}

impl ActivityTierProvider for InMemoryReferenceStore {
    fn tiers_for_role(&self, role: &str) -> ApiResult<Vec<ActivityTier>> {
        Ok(self
            .tiers
            .iter()
            .filter(|tier| tier.role == role)
            .cloned()
            .collect())
    }
}

impl KpiWeightProvider for InMemoryReferenceStore {
    fn weights_for_role(&self, role: &str) -> ApiResult<Vec<KpiWeight>> {
        Ok(self
            .weights
            .iter()
            .filter(|weight| weight.active && weight.role == role)
            .cloned()
            .collect())
    }
}

// ==========================================
// 仓储绩效奖金系统 - 金额规则常量与舍入
// ==========================================
// 红线: 内部全精度计算,只在输出边界舍入
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};

/// 输出金额/生产率保留的小数位
pub const OUTPUT_DECIMALS: u32 = 2;

/// 作业毛值中实际发放的比例（固定 50%,与岗位无关）
pub const ACTIVITY_PAYOUT_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// 输出边界舍入: 2 位小数,四舍五入（0.5 远离零）
pub fn round_output(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// 毛值 → 发放小计
///
/// 先按输出精度舍入毛值再取比例,保证 round(小计) = round(展示毛值 × 50%)
pub fn payout_share(gross_value: Decimal) -> Decimal {
    round_output(gross_value) * ACTIVITY_PAYOUT_SHARE
}

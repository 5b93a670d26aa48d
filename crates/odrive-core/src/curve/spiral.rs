//! Euler spiral (clothoid) evaluation.
//!
//! Fresnel integrals use the rational approximations from the Cephes math
//! library, the same ones the OpenDRIVE reference spiral code is built on.

use std::f64::consts::PI;

const SN: [f64; 6] = [
    -2.991_819_194_010_198_537_26E3,
    7.088_400_452_577_385_768_63E5,
    -6.297_414_862_058_625_065_37E7,
    2.548_908_805_733_763_591_04E9,
    -4.429_795_180_596_977_791_03E10,
    3.180_162_978_765_678_179_86E11,
];

const SD: [f64; 6] = [
    2.813_762_688_899_943_156_96E2,
    4.558_478_108_065_325_816_75E4,
    5.173_438_887_700_964_007_30E6,
    4.193_202_458_981_112_311_29E8,
    2.244_117_956_453_409_209_40E10,
    6.073_663_894_900_846_390_49E11,
];

const CN: [f64; 6] = [
    -4.988_431_145_735_735_486_51E-8,
    9.504_280_628_298_596_051_34E-6,
    -6.451_914_356_839_650_509_62E-4,
    1.888_433_193_967_038_500_64E-2,
    -2.055_259_009_550_138_917_93E-1,
    9.999_999_999_999_999_988_22E-1,
];

const CD: [f64; 7] = [
    3.999_829_689_724_959_803_67E-12,
    9.154_392_157_746_574_787_99E-10,
    1.250_018_624_795_988_214_74E-7,
    1.222_627_890_241_790_309_97E-5,
    8.680_295_429_417_843_006_06E-4,
    4.121_420_907_221_997_929_36E-2,
    1.000_000_000_000_000_001_18E0,
];

const FN: [f64; 10] = [
    4.215_435_550_436_775_465_06E-1,
    1.434_079_197_807_588_852_61E-1,
    1.152_209_550_735_857_588_35E-2,
    3.450_179_397_825_740_279_00E-4,
    4.636_137_492_878_673_220_88E-6,
    3.055_689_837_902_576_058_27E-8,
    1.023_045_141_649_072_334_65E-10,
    1.720_107_432_681_618_288_79E-13,
    1.342_832_762_330_627_589_25E-16,
    3.763_297_112_699_878_890_06E-20,
];

const FD: [f64; 10] = [
    7.515_863_983_533_789_471_75E-1,
    1.168_889_258_591_913_821_42E-1,
    6.440_515_265_088_586_110_05E-3,
    1.559_344_091_641_530_208_73E-4,
    1.846_275_673_489_305_458_70E-6,
    1.126_992_247_639_990_352_61E-8,
    3.601_400_295_893_713_704_04E-11,
    5.887_545_336_215_784_100_10E-14,
    4.520_014_340_741_297_014_96E-17,
    1.254_432_370_900_112_643_84E-20,
];

const GN: [f64; 11] = [
    5.044_420_736_433_832_658_87E-1,
    1.971_028_335_255_234_117_09E-1,
    1.876_485_840_925_752_492_93E-2,
    6.840_793_809_153_930_901_72E-4,
    1.151_388_261_118_842_809_31E-5,
    9.828_524_436_884_222_238_54E-8,
    4.453_444_158_617_501_447_38E-10,
    1.082_680_411_390_208_703_18E-12,
    1.375_554_606_332_617_998_68E-15,
    8.363_544_356_306_774_215_31E-19,
    1.869_587_101_627_832_351_06E-22,
];

const GD: [f64; 11] = [
    1.474_957_599_251_283_245_29E0,
    3.377_489_891_200_199_704_51E-1,
    2.536_037_414_203_387_951_22E-2,
    8.146_791_071_843_061_790_49E-4,
    1.275_450_756_677_291_187_02E-5,
    1.043_145_896_575_719_905_85E-7,
    4.606_807_281_465_204_282_11E-10,
    1.102_732_150_662_402_707_57E-12,
    1.387_965_312_595_788_712_58E-15,
    8.391_588_162_831_187_073_63E-19,
    1.869_587_101_627_832_363_42E-22,
];

/// Horner evaluation of `coef[0]·xⁿ + ... + coef[n]`.
fn polevl(x: f64, coef: &[f64]) -> f64 {
    coef.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Like [`polevl`] with an implicit leading coefficient of 1.
fn p1evl(x: f64, coef: &[f64]) -> f64 {
    coef.iter().fold(1.0, |acc, &c| acc * x + c)
}

/// Fresnel integrals `(S(x), C(x))`.
pub(crate) fn fresnel(xxa: f64) -> (f64, f64) {
    let x = xxa.abs();
    let x2 = x * x;

    let (ss, cc) = if x2 < 2.5625 {
        let t = x2 * x2;
        (
            x * x2 * polevl(t, &SN) / p1evl(t, &SD),
            x * polevl(t, &CN) / polevl(t, &CD),
        )
    } else if x > 36974.0 {
        (0.5, 0.5)
    } else {
        let t = PI * x2;
        let u = 1.0 / (t * t);
        let t = 1.0 / t;
        let f = 1.0 - u * polevl(u, &FN) / p1evl(u, &FD);
        let g = t * polevl(u, &GN) / p1evl(u, &GD);

        let (s, c) = (PI * 0.5 * x2).sin_cos();
        let t = PI * x;
        (0.5 - (f * c + g * s) / t, 0.5 + (f * s - g * c) / t)
    };

    if xxa < 0.0 { (-ss, -cc) } else { (ss, cc) }
}

/// Point and heading of a clothoid starting at the origin with heading 0 and
/// curvature 0, at arc length `s`, for curvature rate `c_dot` (≠ 0).
pub(crate) fn odr_spiral(s: f64, c_dot: f64) -> (f64, f64, f64) {
    let a = (PI / c_dot.abs()).sqrt();
    let (y, x) = fresnel(s / a);
    let (x, mut y) = (x * a, y * a);
    if c_dot < 0.0 {
        y = -y;
    }
    (x, y, s * s * c_dot * 0.5)
}

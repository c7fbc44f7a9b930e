//! 요청 심볼 → 외부 시세 제공자 심볼 변환.
//!
//! 프라하 증권거래소(PSE) 우선주 코드를 Alpha Vantage의 `.PR` 접미사
//! 티커로 매핑합니다. 매핑에 없는 심볼은 그대로 통과합니다.

/// PSE 코드 → 제공자 심볼 별칭 테이블.
const PROVIDER_ALIASES: [(&str, &str); 8] = [
    ("BAACEZ", "CEZ.PR"),
    ("BAAKOMB", "KOMB.PR"),
    ("BAAERST", "ERST.PR"),
    ("BAATELEC", "O2.PR"),
    ("BAAVGP", "VGP.PR"),
    ("BAAPHILIP", "TABAK.PR"),
    ("BAAMONETA", "MONETA.PR"),
    ("BAACOLT", "CZG.PR"),
];

/// 심볼 변환 서비스.
///
/// 고정 테이블만 사용하므로 상태가 없고 항상 성공합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolResolver;

impl SymbolResolver {
    pub fn new() -> Self {
        Self
    }

    /// 요청 심볼을 제공자 심볼로 변환합니다.
    ///
    /// 대소문자를 구분하며, 알 수 없는 심볼은 입력 그대로 반환합니다.
    pub fn to_provider_symbol<'a>(&self, symbol: &'a str) -> &'a str {
        PROVIDER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == symbol)
            .map(|(_, provider)| *provider)
            .unwrap_or(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_alias() {
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.to_provider_symbol("BAACEZ"), "CEZ.PR");
        assert_eq!(resolver.to_provider_symbol("BAATELEC"), "O2.PR");
        assert_eq!(resolver.to_provider_symbol("BAAPHILIP"), "TABAK.PR");
        assert_eq!(resolver.to_provider_symbol("BAACOLT"), "CZG.PR");
    }

    #[test]
    fn test_unknown_symbol_passes_through() {
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.to_provider_symbol("XYZ"), "XYZ");
        // 대소문자 구분
        assert_eq!(resolver.to_provider_symbol("baacez"), "baacez");
    }

    #[test]
    fn test_every_alias_maps_to_prague_ticker() {
        let resolver = SymbolResolver::new();
        for (alias, provider) in PROVIDER_ALIASES {
            assert_eq!(resolver.to_provider_symbol(alias), provider);
            assert!(provider.ends_with(".PR"));
        }
    }
}

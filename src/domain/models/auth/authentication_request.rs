/// 스코프별 인증 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    /// 토큰이 있으면 검증하고 없으면 그대로 통과
    Optional,
}

/// 접근에 필요한 역할
#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single("shopper".to_string());
        assert!(required.is_satisfied(&["user".to_string(), "shopper".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
    }
}

use super::event::RoomId;

/// Order independent; `_` and `\` in identities are escaped so the separator can't be forged.
pub fn resolve_room(a: &str, b: &str) -> RoomId {
    if a == b {
        return RoomId(format!("self_chat_{}", escape(a)));
    }

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    RoomId(format!("private_{}_{}", escape(lo), escape(hi)))
}

fn escape(identity: &str) -> String {
    let mut out = String::with_capacity(identity.len());
    for c in identity.chars() {
        if c == '_' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric() {
        assert_eq!(resolve_room("alice", "bob"), resolve_room("bob", "alice"));
        assert_eq!(resolve_room("alice", "bob").as_str(), "private_alice_bob");
    }

    #[test]
    fn self_chat_is_its_own_room() {
        let own = resolve_room("carol", "carol");
        assert_eq!(own.as_str(), "self_chat_carol");
        for other in ["alice", "carol2", "", "self"] {
            assert_ne!(own, resolve_room("carol", other));
        }
    }

    #[test]
    fn stable() {
        assert_eq!(resolve_room("x@mail.com", "y@mail.com"), resolve_room("x@mail.com", "y@mail.com"));
    }

    #[test]
    fn underscores_cannot_collide() {
        assert_ne!(resolve_room("a_b", "c"), resolve_room("a", "b_c"));
        assert_ne!(resolve_room("a_", "b"), resolve_room("a", "_b"));
        assert_ne!(resolve_room("a\\", "_b"), resolve_room("a\\_", "b"));
        assert_eq!(resolve_room("a_b", "c").as_str(), "private_a\\_b_c");
    }
}

use {
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        ops::Index,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON with a two-space indent.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"  ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                match ::serde::Serialize::serialize(self, &mut ser) {
                    Ok(()) => (),
                    Err(e) => {
                        ::log::error!("Failed to serialize: {}", e);
                        return Err(::std::fmt::Error {});
                    }
                };
                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// Whether a [StringLikeList] is rendered as a bare value or as a JSON array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListKind {
    Single,
    List,
}

/// A policy field that is either a single string-like value or a list of them.
///
/// Policy documents accept both shapes for `Action` and `Resource`; the shape chosen at construction time is kept
/// when serializing.
#[derive(Clone, Eq)]
pub enum StringLikeList<T> {
    Single(T),
    List(Vec<T>),
}

impl<T> StringLikeList<T> {
    pub fn kind(&self) -> ListKind {
        match self {
            Self::Single(_) => ListKind::Single,
            Self::List(_) => ListKind::List,
        }
    }

    pub fn to_vec(&self) -> Vec<&T> {
        match self {
            Self::Single(v) => vec![v],
            Self::List(v) => v.iter().collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::Single(v) => std::slice::from_ref(v).iter(),
            Self::List(v) => v.iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(v) => v.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(v) => v.len(),
        }
    }
}

impl<T: Debug> Debug for StringLikeList<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Single(v) => write!(f, "{:?}", v),
            Self::List(v) => write!(f, "{:?}", v),
        }
    }
}

impl<T: PartialEq> PartialEq for StringLikeList<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(v1), Self::Single(v2)) => v1 == v2,
            (Self::List(v1), Self::List(v2)) => v1 == v2,
            (Self::Single(v1), Self::List(v2)) => v2.len() == 1 && v1 == &v2[0],
            (Self::List(v1), Self::Single(v2)) => v1.len() == 1 && &v1[0] == v2,
        }
    }
}

impl<T> From<T> for StringLikeList<T> {
    fn from(v: T) -> Self {
        Self::Single(v)
    }
}

impl<T> From<Vec<T>> for StringLikeList<T> {
    fn from(v: Vec<T>) -> Self {
        Self::List(v)
    }
}

impl<T> Index<usize> for StringLikeList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Single(v) => {
                if index == 0 {
                    v
                } else {
                    panic!("index out of bounds: the len is 1 but the index is {}", index);
                }
            }
            Self::List(v) => &v[index],
        }
    }
}

impl<T: Serialize> Serialize for StringLikeList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => v.serialize(serializer),
            Self::List(v) => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ListKind, StringLikeList},
        pretty_assertions::{assert_eq, assert_ne},
        serde::Serialize,
        std::panic::catch_unwind,
    };

    #[test_log::test]
    fn test_basic_ops() {
        let sl1a = StringLikeList::<u32>::Single(1);
        let sl1b = StringLikeList::<u32>::List(vec![1]);
        let sl2a = StringLikeList::<u32>::List(vec![1, 2]);
        let sl2b = StringLikeList::<u32>::List(vec![1, 2]);
        let sl3 = StringLikeList::<u32>::List(vec![]);
        assert_eq!(sl1a, sl1b);
        assert_eq!(sl1b, sl1a);
        assert_ne!(sl1a, sl2a);
        assert_ne!(sl2b, sl1a);
        assert_eq!(sl2a, sl2b);

        assert_eq!(sl1a.kind(), ListKind::Single);
        assert_eq!(sl1b.kind(), ListKind::List);

        assert!(!sl1a.is_empty());
        assert!(!sl2a.is_empty());
        assert!(sl3.is_empty());
        assert_eq!(sl1a.len(), 1);
        assert_eq!(sl2a.len(), 2);
        assert_eq!(sl3.len(), 0);

        assert_eq!(sl2a.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(sl1a.to_vec(), vec![&1]);

        assert_eq!(format!("{:?}", sl1a), "1");
        assert_eq!(format!("{:?}", sl1b), "[1]");

        assert_eq!(sl1a[0], 1);
        let e = catch_unwind(|| {
            let single = StringLikeList::<u32>::Single(1);
            println!("This won't print: {}", single[1]);
        })
        .unwrap_err();
        assert_eq!(*e.downcast::<String>().unwrap(), "index out of bounds: the len is 1 but the index is 1");
    }

    #[test_log::test]
    fn test_serialize_keeps_shape() {
        let single: StringLikeList<String> = "a".to_string().into();
        let list: StringLikeList<String> = vec!["a".to_string()].into();

        assert_eq!(serde_json::to_string(&single).unwrap(), r#""a""#);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a"]"#);
    }

    #[derive(Clone, Debug)]
    struct SerFail {}
    display_json!(SerFail);

    impl Serialize for SerFail {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("Serialization failed"))
        }
    }

    #[test_log::test]
    fn test_ser_fail() {
        let e = catch_unwind(|| SerFail {}.to_string()).unwrap_err();
        let e2 = e.downcast::<String>().unwrap();
        assert!((*e2).contains("a Display implementation returned an error"));
    }
}

use regex::{Captures, Regex};

/// An engine operation named by a request line, with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Register,
    Join,
    Cancel,
    GetStatus { game_id: String, brief: bool },
    PlayWord { game_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteTag {
    Register,
    Join,
    Cancel,
    BriefStatus,
    Status,
    PlayWord,
}

#[derive(Debug)]
struct Route {
    tag: RouteTag,
    pattern: Regex,
}

/// Ordered request-line matchers. The first match wins, so a pattern must
/// come before any less specific pattern that would also match its lines.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let prefix = regex::escape(prefix.trim_end_matches('/'));
        let patterns = [
            (RouteTag::Register, format!(r"^POST {prefix}/users HTTP")),
            (RouteTag::Join, format!(r"^POST {prefix}/games HTTP")),
            (RouteTag::Cancel, format!(r"^PUT {prefix}/games HTTP")),
            (
                RouteTag::BriefStatus,
                format!(r"^GET {prefix}/games/(\d+)\?[bB]rief=([a-zA-Z]+) HTTP"),
            ),
            (RouteTag::Status, format!(r"^GET {prefix}/games/(\d+) HTTP")),
            (RouteTag::PlayWord, format!(r"^PUT {prefix}/games/(\d+) HTTP")),
        ];

        let routes = patterns
            .into_iter()
            .map(|(tag, pattern)| {
                Ok(Route {
                    tag,
                    pattern: Regex::new(&pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { routes })
    }

    pub fn resolve(&self, request_line: &str) -> Option<Operation> {
        self.routes.iter().find_map(|route| {
            let captures = route.pattern.captures(request_line)?;
            Some(route.tag.operation(&captures))
        })
    }
}

impl RouteTag {
    fn operation(self, captures: &Captures<'_>) -> Operation {
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        match self {
            RouteTag::Register => Operation::Register,
            RouteTag::Join => Operation::Join,
            RouteTag::Cancel => Operation::Cancel,
            RouteTag::BriefStatus => Operation::GetStatus {
                game_id: group(1),
                brief: group(2).eq_ignore_ascii_case("yes"),
            },
            RouteTag::Status => Operation::GetStatus {
                game_id: group(1),
                brief: false,
            },
            RouteTag::PlayWord => Operation::PlayWord { game_id: group(1) },
        }
    }
}

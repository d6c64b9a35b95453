//! Static stance table and topic groups.
//!
//! Ids are 1-based and stable. Declaration order here is the order of
//! label vector positions and of the export columns.

/// Number of votable stances (length of every label vector)
pub const VOTABLE_COUNT: usize = 28;

/// Id of the "no politically relevant opinion" sentinel
pub const SENTINEL_ID: u8 = 29;

/// (id, name) pairs, votable stances first, sentinel last
pub(crate) const STANCES: [(u8, &str); 29] = [
    (1, "Criticism of police and federal detainment practices as abuse of power"),
    (2, "Support for police and federal detainment practices as necessary for law and order"),
    (3, "Support for higher taxes for government involvement"),
    (4, "Criticism of high taxes for government involvement"),
    (5, "Criticism of illegal immigration"),
    (6, "Support for pathway to citizenship for undocumented immigrants"),
    (7, "Support for universal healthcare"),
    (8, "Opposition to government-funded healthcare"),
    (9, "Support for abortion rights"),
    (10, "Support for abortion ban"),
    (11, "Support for LGBTQ+ rights and same-sex marriage"),
    (12, "Opposition to LGBTQ+ rights and same-sex marriage"),
    (13, "Support for gun ownership rights"),
    (14, "Support for stricter gun control laws"),
    (15, "Support for strong national defense spending"),
    (16, "Criticism of military intervention and spending"),
    (17, "Support for renewable energy and climate action"),
    (18, "Criticism of climate change policies as economically harmful"),
    (19, "Support for legalization of marijuana"),
    (20, "Opposition to legalization of marijuana"),
    (21, "Criticism of Democrats or Liberals"),
    (22, "Criticism of Republicans or Conservatives"),
    (23, "Criticism of Donald Trump or Republican Party Leadership"),
    (24, "Criticism of Joe Biden, Kamala Harris or Democratic Party Leadership"),
    (25, "Support for Donald Trump or Republican Party Leadership"),
    (26, "Support for Joe Biden, Kamala Harris or Democratic Party Leadership"),
    (27, "Criticism of Local Government or Mayor"),
    (28, "Praise for Local Government or Mayor"),
    (SENTINEL_ID, "Does not express any politically relevant opinion"),
];

/// (title, member ids) in display order
pub(crate) const GROUPS: [(&str, [u8; 2]); 14] = [
    ("Police", [1, 2]),
    ("Taxes", [3, 4]),
    ("Immigration", [5, 6]),
    ("Healthcare", [7, 8]),
    ("Abortion", [9, 10]),
    ("LGBTQ+", [11, 12]),
    ("Gun Control", [13, 14]),
    ("Military/Defense", [15, 16]),
    ("Climate/Energy", [17, 18]),
    ("Marijuana", [19, 20]),
    ("Political Parties (General)", [21, 22]),
    ("Political Leadership (Criticism)", [23, 24]),
    ("Political Leadership (Support)", [25, 26]),
    ("Local Government", [27, 28]),
];

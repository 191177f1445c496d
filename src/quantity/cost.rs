quantity!(
    /// US dollars.
    Dollars,
    "USD",
    2
);

quantity!(Kilograms, "kg", 1);

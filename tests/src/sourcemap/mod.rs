mod linemap;
